// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! Shared fixtures, builders and helpers for integration tests.
//!
//! ## Module Structure
//!
//! - `fixtures`: pre-built tokens, configs and seeded stores
//! - `builders`: request builders for router-level tests
//! - `assertions`: response assertion helpers
//! - `harness`: in-process and network test harnesses

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod harness;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use harness::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,slate=debug")),
            )
            .with_test_writer()
            .init();
    });
}
