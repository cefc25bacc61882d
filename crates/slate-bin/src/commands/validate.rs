// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `validate` command: parse and validate the configuration file.

use std::path::Path;

use crate::cli::ValidateArgs;
use crate::error::BinResult;

/// Validates the configuration file, optionally printing the parsed form.
pub async fn execute(config_path: &Path, args: &ValidateArgs) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;

    println!("Configuration OK: {}", config_path.display());

    if args.show_config {
        // Secrets are skip_serializing; this is safe to print.
        match serde_yaml::to_string(&config) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => tracing::warn!(error = %e, "Failed to render configuration"),
        }
    }

    Ok(())
}
