// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-config
//!
//! Configuration loading and schema for the SLATE learning management
//! platform.
//!
//! Configuration files may be written in YAML, TOML or JSON; the format is
//! selected by file extension. A fixed set of environment variables
//! (`SLATE_*`) overrides file values after parsing.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{
    ApiSection, BootstrapAdminSection, ChatSection, ClientSection, InstanceConfig, JwtSection,
    LoggingConfig, SlateConfig,
};

use std::path::Path;

/// Loads a configuration file with default loader settings.
///
/// Convenience wrapper for `ConfigLoader::new().load(path)`.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<SlateConfig> {
    ConfigLoader::new().load(path)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
