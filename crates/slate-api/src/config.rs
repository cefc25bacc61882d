// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::JwtConfig;

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Allowed CORS origins (`*` for any).
    pub cors_origins: Vec<String>,
    /// Request timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Chat upstream configuration.
    pub chat: ChatConfig,
    /// Admin account created at startup when the directory is empty.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 5000,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            jwt: JwtConfig::default(),
            chat: ChatConfig::default(),
            bootstrap_admin: None,
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the JWT configuration.
    pub fn with_jwt(mut self, jwt: JwtConfig) -> Self {
        self.jwt = jwt;
        self
    }
}

// =============================================================================
// ChatConfig
// =============================================================================

/// Configuration for the chat upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Upstream endpoint URL. Empty disables the chat endpoint.
    pub upstream_url: String,
    /// API key sent to the upstream, if required.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Upstream request timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            upstream_url: String::new(),
            api_key: String::new(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl ChatConfig {
    /// Returns `true` if a chat upstream is configured.
    pub fn is_enabled(&self) -> bool {
        !self.upstream_url.is_empty()
    }
}

// =============================================================================
// BootstrapAdmin
// =============================================================================

/// The admin account seeded into an empty directory at startup.
///
/// Without it a fresh deployment has no account that could create the first
/// records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password; hashed before storage.
    #[serde(skip_serializing)]
    pub password: String,
}

// =============================================================================
// duration_secs serde module
// =============================================================================

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 5000);
        assert!(!config.chat.is_enabled());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig::default().with_port(9000);
        assert_eq!(config.socket_addr().port(), 9000);
    }

    #[test]
    fn test_duration_round_trip() {
        let config = ApiConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ApiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.request_timeout, Duration::from_secs(30));
    }
}
