// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SLATE - learning management platform.
//!
//! Main binary entry point.

use slate_bin::cli::{Cli, Commands};
use slate_bin::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    logging::init_logging(cli.effective_log_level(), cli.log_format);

    let result = match cli.effective_command() {
        Commands::Serve(args) => commands::serve::execute(&cli.config, &args).await,
        Commands::Validate(args) => commands::validate::execute(&cli.config, &args).await,
        Commands::Version => {
            commands::version::execute();
            Ok(())
        }
        Commands::Health(args) => commands::health::execute(&cli.config, &args).await,
        Commands::Login(args) => commands::session::login(&cli.config, &args).await,
        Commands::Whoami => commands::session::whoami(&cli.config).await,
        Commands::Chat(args) => commands::session::chat(&cli.config, &args).await,
        Commands::Logout => commands::session::logout(&cli.config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
