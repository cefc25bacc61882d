// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! Subcommands:
//!
//! - `serve`: start the API server (default)
//! - `validate`: validate the configuration file
//! - `version`: show version information
//! - `health`: check a running server's health endpoint

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// SLATE - learning management platform.
#[derive(Parser, Debug)]
#[command(
    name = "slate",
    author = "Sylvex <contact@sylvex.io>",
    version = crate::VERSION,
    about = "SLATE learning management platform",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "slate.yaml",
        env = "SLATE_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "SLATE_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "SLATE_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the SLATE CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the API server
    ///
    /// This is the default command when no subcommand is specified.
    Serve(ServeArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration without starting the server.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,

    /// Check the health of a running server
    Health(HealthArgs),

    /// Log in against a running server and persist the session
    Login(LoginArgs),

    /// Show the logged-in user, derived from the stored token
    Whoami,

    /// Send a chat message to the platform assistant
    Chat(ChatArgs),

    /// Clear the stored session
    Logout,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `serve` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show the parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

/// Arguments for the `health` command.
#[derive(Args, Debug, Clone)]
pub struct HealthArgs {
    /// Timeout for the health check in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,
}

/// Arguments for the `login` command.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Email address
    pub email: String,

    /// Password (falls back to SLATE_PASSWORD)
    #[arg(short, long, env = "SLATE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the `chat` command.
#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// The message to send
    pub message: String,
}

impl Default for HealthArgs {
    fn default() -> Self {
        Self { timeout: 10 }
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Serve` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["slate"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Serve(_)));
    }

    #[test]
    fn test_serve_command_port_override() {
        let cli = Cli::parse_from(["slate", "serve", "-p", "8088"]);
        if let Some(Commands::Serve(args)) = cli.command {
            assert_eq!(args.port, Some(8088));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["slate", "validate", "--show-config"]);
        if let Some(Commands::Validate(args)) = cli.command {
            assert!(args.show_config);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["slate", "-c", "/etc/slate/config.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/slate/config.yaml"));
    }

    #[test]
    fn test_quiet_and_verbose_levels() {
        let cli = Cli::parse_from(["slate", "-q"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["slate", "-v"]);
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::parse_from(["slate", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "trace");
    }

    #[test]
    fn test_health_command_defaults() {
        let cli = Cli::parse_from(["slate", "health"]);
        if let Some(Commands::Health(args)) = cli.command {
            assert_eq!(args.timeout, 10);
        } else {
            panic!("Expected Health command");
        }
    }

    #[test]
    fn test_login_command() {
        let cli = Cli::parse_from(["slate", "login", "root@school.example", "-p", "secret"]);
        if let Some(Commands::Login(args)) = cli.command {
            assert_eq!(args.email, "root@school.example");
            assert_eq!(args.password, "secret");
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_chat_command() {
        let cli = Cli::parse_from(["slate", "chat", "When is sports day?"]);
        if let Some(Commands::Chat(args)) = cli.command {
            assert_eq!(args.message, "When is sports day?");
        } else {
            panic!("Expected Chat command");
        }
    }
}
