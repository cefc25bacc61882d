// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `serve` command: run the API server.

use std::path::Path;

use crate::cli::ServeArgs;
use crate::error::BinResult;
use crate::runtime::PlatformRuntime;

/// Loads configuration and runs the platform until shutdown.
pub async fn execute(config_path: &Path, args: &ServeArgs) -> BinResult<()> {
    let mut config = slate_config::load_config(config_path)?;

    if let Some(port) = args.port {
        config.api.port = port;
    }

    PlatformRuntime::new(config).run().await
}
