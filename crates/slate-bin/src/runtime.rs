// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Platform runtime orchestration.
//!
//! Maps the loaded configuration onto API server components, starts the
//! server and coordinates graceful shutdown.

use std::sync::Arc;

use tracing::info;

use slate_api::{
    auth::JwtConfig,
    config::{ApiConfig, BootstrapAdmin, ChatConfig},
    ApiServer, MemoryStore,
};
use slate_config::SlateConfig;

use crate::error::BinResult;
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// PlatformRuntime
// =============================================================================

/// The platform runtime.
///
/// Owns configuration and the shutdown coordinator; builds and runs the
/// API server.
pub struct PlatformRuntime {
    config: Arc<SlateConfig>,
    shutdown: ShutdownCoordinator,
}

impl PlatformRuntime {
    /// Creates a new runtime over validated configuration.
    pub fn new(config: SlateConfig) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
        }
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Runs the platform until a shutdown signal arrives.
    pub async fn run(self) -> BinResult<()> {
        info!("Starting SLATE v{}", crate::VERSION);

        let server = self.build_server()?;

        self.shutdown.listen_for_signals();

        info!(
            "SLATE is ready (API: {}:{})",
            self.config.api.host, self.config.api.port
        );

        server.run_with_shutdown(self.shutdown.signal()).await?;

        info!("SLATE shutdown complete");
        Ok(())
    }

    /// Builds the API server from configuration.
    fn build_server(&self) -> BinResult<ApiServer> {
        let api_config = api_config_from(&self.config);

        let server = ApiServer::builder()
            .config(api_config)
            .store(Arc::new(MemoryStore::new()))
            .build()?;

        Ok(server)
    }
}

/// Maps the file configuration onto the API server's configuration.
pub fn api_config_from(config: &SlateConfig) -> ApiConfig {
    let api = &config.api;

    ApiConfig {
        host: api.host,
        port: api.port,
        cors_origins: api.cors_origins.clone(),
        request_timeout: std::time::Duration::from_secs(api.request_timeout_secs),
        jwt: JwtConfig {
            secret: api.jwt.secret.clone(),
            issuer: api.jwt.issuer.clone(),
            expiration_secs: api.jwt.expiration_secs,
            ..JwtConfig::default()
        },
        chat: ChatConfig {
            upstream_url: api.chat.upstream_url.clone(),
            api_key: api.chat.api_key.clone(),
            timeout: std::time::Duration::from_secs(api.chat.timeout_secs),
        },
        bootstrap_admin: api.bootstrap_admin.as_ref().map(|b| BootstrapAdmin {
            name: b.name.clone(),
            username: b.username.clone(),
            email: b.email.clone(),
            password: b.password.clone(),
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> SlateConfig {
        let mut config = SlateConfig::default();
        config.api.jwt.secret = "test-secret-key-that-is-long-enough-here".to_string();
        config.api.port = 5099;
        config
    }

    #[test]
    fn test_api_config_mapping() {
        let config = config_with_secret();
        let api_config = api_config_from(&config);

        assert_eq!(api_config.port, 5099);
        assert_eq!(api_config.jwt.issuer, "slate");
        assert_eq!(
            api_config.request_timeout,
            std::time::Duration::from_secs(30)
        );
        assert!(api_config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_build_server() {
        let runtime = PlatformRuntime::new(config_with_secret());
        let server = runtime.build_server().unwrap();
        assert_eq!(server.addr().port(), 5099);
    }
}
