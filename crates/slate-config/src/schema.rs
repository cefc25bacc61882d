// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for SLATE.
//!
//! # Schema Structure
//!
//! ```text
//! SlateConfig
//! ├── instance: InstanceConfig
//! ├── api: ApiSection
//! │   ├── jwt: JwtSection
//! │   └── chat: ChatSection
//! ├── client: ClientSection
//! └── logging: LoggingConfig
//! ```

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default API port.
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default JWT expiration in seconds (1 hour).
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 3600;

/// Default API request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default client request timeout in seconds.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Default chat request timeout in seconds. Assistant replies are slow.
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 120;

/// Minimum accepted JWT secret length in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for SLATE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SlateConfig {
    /// Instance identification.
    pub instance: InstanceConfig,

    /// API server configuration.
    pub api: ApiSection,

    /// Client configuration.
    pub client: ClientSection,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            instance: InstanceConfig::default(),
            api: ApiSection::default(),
            client: ClientSection::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SlateConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.instance.validate()?;
        self.api.validate()?;
        self.client.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

// =============================================================================
// Instance
// =============================================================================

/// Instance identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Stable identifier for this deployment.
    pub id: String,
    /// Human-readable institution name.
    pub name: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            id: "slate".to_string(),
            name: "SLATE".to_string(),
        }
    }
}

impl InstanceConfig {
    /// Validates the instance section.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.id.is_empty() {
            return Err(ConfigError::validation("instance.id", "must not be empty"));
        }
        Ok(())
    }
}

// =============================================================================
// API Section
// =============================================================================

/// API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Allowed CORS origins (`*` for any).
    pub cors_origins: Vec<String>,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// JWT settings.
    pub jwt: JwtSection,
    /// Chat upstream settings.
    pub chat: ChatSection,
    /// Admin account seeded into an empty directory at startup.
    pub bootstrap_admin: Option<BootstrapAdminSection>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: DEFAULT_API_PORT,
            cors_origins: vec!["*".to_string()],
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            jwt: JwtSection::default(),
            chat: ChatSection::default(),
            bootstrap_admin: None,
        }
    }
}

impl ApiSection {
    /// Validates the API section.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::validation("api.port", "must not be 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "api.request_timeout_secs",
                "must be greater than 0",
            ));
        }
        self.jwt.validate()?;
        if let Some(bootstrap) = &self.bootstrap_admin {
            bootstrap.validate()?;
        }
        Ok(())
    }
}

/// The admin account seeded into an empty directory at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminSection {
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

impl BootstrapAdminSection {
    /// Validates the bootstrap admin section.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.email.is_empty() {
            return Err(ConfigError::validation(
                "api.bootstrap_admin.email",
                "must be set",
            ));
        }
        if self.password.is_empty() {
            return Err(ConfigError::validation(
                "api.bootstrap_admin.password",
                "must be set",
            ));
        }
        Ok(())
    }
}

/// JWT settings for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSection {
    /// Signing secret. Must be set before the server will start.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token issuer.
    pub issuer: String,
    /// Token lifetime in seconds.
    pub expiration_secs: i64,
}

impl Default for JwtSection {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "slate".to_string(),
            expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
        }
    }
}

impl JwtSection {
    /// Validates the JWT section.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation("api.jwt.secret", "must be set"));
        }
        if self.secret.len() < MIN_JWT_SECRET_LEN {
            tracing::warn!(
                "JWT secret is shorter than recommended ({} bytes)",
                MIN_JWT_SECRET_LEN
            );
        }
        if self.expiration_secs <= 0 {
            return Err(ConfigError::validation(
                "api.jwt.expiration_secs",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Chat upstream settings.
///
/// The assistant backing the chat endpoint is an external collaborator; the
/// API server only forwards messages to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    /// Upstream endpoint URL. Empty disables the chat endpoint.
    pub upstream_url: String,
    /// API key sent to the upstream, if required.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            upstream_url: String::new(),
            api_key: String::new(),
            timeout_secs: DEFAULT_CHAT_TIMEOUT_SECS,
        }
    }
}

impl ChatSection {
    /// Returns `true` if a chat upstream is configured.
    pub fn is_enabled(&self) -> bool {
        !self.upstream_url.is_empty()
    }
}

// =============================================================================
// Client Section
// =============================================================================

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    /// Base URL of the API server.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Chat request timeout in seconds.
    pub chat_timeout_secs: u64,
    /// Path of the session file. Defaults to `.slate-session.json` in the
    /// working directory when unset.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:{}/api", DEFAULT_API_PORT),
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            chat_timeout_secs: DEFAULT_CHAT_TIMEOUT_SECS,
            session_file: None,
        }
    }
}

impl ClientSection {
    /// Validates the client section.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::validation("client.base_url", "must be set"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "client.timeout_secs",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Log format (text, json, compact).
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Validates the logging section.
    pub fn validate(&self) -> ConfigResult<()> {
        match self.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "warning" | "error" => {}
            other => {
                return Err(ConfigError::validation(
                    "logging.level",
                    format!("unknown level '{}'", other),
                ))
            }
        }
        match self.format.to_lowercase().as_str() {
            "text" | "json" | "compact" => Ok(()),
            other => Err(ConfigError::validation(
                "logging.format",
                format!("unknown format '{}'", other),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
