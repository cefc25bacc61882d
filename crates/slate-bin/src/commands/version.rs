// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `version` command.

/// Prints version information for all components.
pub fn execute() {
    println!("slate {}", crate::VERSION);
    println!("  slate-core   {}", slate_core::VERSION);
    println!("  slate-config {}", slate_config::VERSION);
    println!("  slate-api    {}", slate_api::VERSION);
    println!("  slate-client {}", slate_client::VERSION);
}
