//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ordersync configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, StateBackend};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Provider: {}", config.provider.base_url);
        println!(
            "  Retries: {} attempts, {}ms apart",
            config.provider.retry.max_retries, config.provider.retry.delay_ms
        );
        println!(
            "  Product lookups: at most one every {}ms",
            config.provider.rate_limit.min_interval_ms
        );
        match config.sync.max_pages {
            Some(n) => println!("  Page limit: {n}"),
            None => println!("  Page limit: none"),
        }
        match config.state.backend {
            StateBackend::File => {
                println!("  Checkpoint: file {}", config.state.checkpoint_path)
            }
            StateBackend::PostgreSQL => {
                println!("  Checkpoint: postgresql ({})", config.state.source_name)
            }
        }
        println!(
            "  Destination: {}",
            config
                .destination
                .postgresql
                .connection_string
                .expose_secret()
                .as_str()
                .split('@')
                .next_back()
                .unwrap_or("***")
        );
        println!("  Schema: {}", config.destination.schema);
        println!("  Orders Table: {}", config.destination.orders_table());
        println!("  Items Table: {}", config.destination.items_table());
        if let Some(path) = &config.state.skip_ledger_path {
            println!("  Skip Ledger: {path}");
        }

        Ok(EXIT_OK)
    }
}
