//! Status command implementation
//!
//! This module implements the `status` command for displaying the current
//! checkpoint.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK, EXIT_UNREACHABLE};
use crate::adapters::database::create_checkpoint_store;
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking sync status");

        println!("📊 Sync Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let store = match create_checkpoint_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to open checkpoint store");
                println!("   Error: {e}");
                return Ok(EXIT_UNREACHABLE);
            }
        };

        println!("  Checkpoint store: {}", store.describe());
        println!(
            "  Destination: {}.{} / {}.{}",
            config.destination.schema,
            config.destination.orders_table(),
            config.destination.schema,
            config.destination.items_table()
        );

        match store.load().await {
            Ok(Some(checkpoint)) => {
                println!("  Last synced order: {checkpoint}");
                Ok(EXIT_OK)
            }
            Ok(None) => {
                println!("  Last synced order: none");
                println!();
                println!("No sync history found.");
                println!("Run 'ordersync sync' to start syncing orders.");
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to read checkpoint");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
