// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Binary-level error types.

use thiserror::Error;

/// Result type alias for binary operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors surfaced by the `slate` binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] slate_config::ConfigError),

    /// The API server failed.
    #[error("API error: {0}")]
    Api(#[from] slate_api::ApiError),

    /// The client failed.
    #[error("Client error: {0}")]
    Client(#[from] slate_client::ClientError),

    /// A component failed to initialize.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
