// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-bin
//!
//! The `slate` binary: CLI parsing, logging bootstrap, runtime
//! orchestration and graceful shutdown for the SLATE learning management
//! platform.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

pub use error::{BinError, BinResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
