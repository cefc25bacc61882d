// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Model-level error types.

use thiserror::Error;

/// Errors produced when parsing or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The value is not one of the known roles.
    #[error("unknown role: {0:?}")]
    InvalidRole(String),

    /// The value is not a known attendance status.
    #[error("unknown attendance status: {0:?}")]
    InvalidAttendanceStatus(String),

    /// The value is not a known announcement audience.
    #[error("unknown announcement audience: {0:?}")]
    InvalidAudience(String),
}
