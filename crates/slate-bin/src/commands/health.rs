// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `health` command: probe a running server.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

use crate::cli::HealthArgs;
use crate::error::{BinError, BinResult};

/// Probes the server's `/health` endpoint and prints the outcome.
///
/// Exits non-zero (via the returned error) when the server is unreachable
/// or unhealthy.
pub async fn execute(config_path: &Path, args: &HealthArgs) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;

    // A wildcard bind address is not a dialable host.
    let host = match config.api.host {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        other => other,
    };
    let url = format!("http://{}:{}/health", host, config.api.port);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .map_err(|e| BinError::Initialization(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| BinError::Initialization(format!("Health check failed: {}", e)))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or_default();

    if status.is_success() {
        println!(
            "Server healthy: {} (version {})",
            url,
            body.get("version").and_then(|v| v.as_str()).unwrap_or("?")
        );
        Ok(())
    } else {
        Err(BinError::Initialization(format!(
            "Server unhealthy: {} returned {}",
            url, status
        )))
    }
}
