//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ordersync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ordersync - incremental Tiny ERP order sync
#[derive(Parser, Debug)]
#[command(name = "ordersync")]
#[command(version, about, long_about = None)]
#[command(author = "Ordersync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ordersync.toml", env = "ORDERSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ORDERSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull new orders from the provider into the destination tables
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show the current checkpoint
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from(["ordersync", "sync"]);
        assert_eq!(cli.config, "ordersync.toml");
        match cli.command {
            Commands::Sync(args) => {
                assert!(!args.dry_run);
                assert_eq!(args.max_pages, None);
            }
            other => panic!("expected sync, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_sync_flags() {
        let cli = Cli::parse_from(["ordersync", "sync", "--dry-run", "--max-pages", "3"]);
        match cli.command {
            Commands::Sync(args) => {
                assert!(args.dry_run);
                assert_eq!(args.max_pages, Some(3));
            }
            other => panic!("expected sync, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ordersync", "--config", "custom.toml", "sync"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ordersync", "--log-level", "debug", "sync"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["ordersync", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["ordersync", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["ordersync", "init", "--output", "x.toml", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "x.toml");
                assert!(args.force);
            }
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["ordersync", "export"]).is_err());
    }
}
