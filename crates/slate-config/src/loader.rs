// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading and processing.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and parse it according to its extension
//! 2. Apply environment variable overrides (`SLATE_*`)
//! 3. Validate the result
//!
//! # Environment Variable Overrides
//!
//! ```text
//! SLATE_API_HOST=127.0.0.1
//! SLATE_API_PORT=5050
//! SLATE_JWT_SECRET=...
//! SLATE_CHAT_UPSTREAM_URL=https://assistant.example/api
//! SLATE_CHAT_API_KEY=...
//! SLATE_CLIENT_BASE_URL=http://localhost:5050/api
//! SLATE_LOG_LEVEL=debug
//! SLATE_LOG_FORMAT=json
//! ```

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::SlateConfig;

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for SLATE.
///
/// # Examples
///
/// ```no_run
/// use slate_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load("slate.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,
    /// Whether to apply environment variable overrides.
    apply_env: bool,
    /// Whether to validate after loading.
    validate: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: "SLATE".to_string(),
            apply_env: true,
            validate: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable overrides.
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.apply_env = enabled;
        self
    }

    /// Enables or disables validation after loading.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Loads configuration from a file.
    ///
    /// The file format is determined by the file extension: `.yaml`/`.yml`,
    /// `.toml` or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<SlateConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ConfigFormat::from_path(path)?;
        let mut config = self.parse_content(&content, format, path)?;

        if self.apply_env {
            self.apply_env_overrides(&mut config)?;
        }

        if self.validate {
            config.validate()?;
        }

        Ok(config)
    }

    /// Parses file content in the given format.
    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<SlateConfig> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::parse(path, e.to_string())),
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::parse(path, e.to_string()))
            }
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::parse(path, e.to_string())),
        }
    }

    /// Applies `SLATE_*` environment variable overrides.
    fn apply_env_overrides(&self, config: &mut SlateConfig) -> ConfigResult<()> {
        if let Some(host) = self.env_var("API_HOST") {
            config.api.host = host
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(self.key("API_HOST"), "not an IP address"))?;
        }
        if let Some(port) = self.env_var("API_PORT") {
            config.api.port = port
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(self.key("API_PORT"), "not a port number"))?;
        }
        if let Some(secret) = self.env_var("JWT_SECRET") {
            config.api.jwt.secret = secret;
        }
        if let Some(url) = self.env_var("CHAT_UPSTREAM_URL") {
            config.api.chat.upstream_url = url;
        }
        if let Some(key) = self.env_var("CHAT_API_KEY") {
            config.api.chat.api_key = key;
        }
        if let Some(url) = self.env_var("CLIENT_BASE_URL") {
            config.client.base_url = url;
        }
        if let Some(level) = self.env_var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = self.env_var("LOG_FORMAT") {
            config.logging.format = format;
        }
        Ok(())
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    fn env_var(&self, suffix: &str) -> Option<String> {
        let key = self.key(suffix);
        match env::var(&key) {
            Ok(value) if !value.is_empty() => {
                debug!("Applying override from {}", key);
                Some(value)
            }
            _ => None,
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "slate.yaml",
            r#"
api:
  port: 5050
  jwt:
    secret: test-secret-key-that-is-long-enough-here
"#,
        );

        let config = ConfigLoader::new().with_env_overrides(false).load(path).unwrap();
        assert_eq!(config.api.port, 5050);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "slate.toml",
            r#"
[api]
port = 6000

[api.jwt]
secret = "test-secret-key-that-is-long-enough-here"
"#,
        );

        let config = ConfigLoader::new().with_env_overrides(false).load(path).unwrap();
        assert_eq!(config.api.port, 6000);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().load("/nonexistent/slate.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "slate.ini", "[api]\n");

        let result = ConfigLoader::new().load(path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        // No JWT secret configured.
        let path = write_file(&dir, "slate.yaml", "api:\n  port: 5050\n");

        let result = ConfigLoader::new().with_env_overrides(false).load(path);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "slate.yaml",
            "api:\n  jwt:\n    secret: test-secret-key-that-is-long-enough-here\n",
        );

        // A distinct prefix keeps this test isolated from the real environment.
        std::env::set_var("SLATETEST_API_PORT", "7777");
        let config = ConfigLoader::new()
            .with_env_prefix("SLATETEST")
            .load(path)
            .unwrap();
        std::env::remove_var("SLATETEST_API_PORT");

        assert_eq!(config.api.port, 7777);
    }
}
