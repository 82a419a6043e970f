//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ordersync.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ordersync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set TINY_API_TOKEN");
                println!("     - Set ORDERSYNC_PG_CONNECTION");
                println!("  3. Validate configuration: ordersync validate-config");
                println!("  4. Preview a run: ordersync sync --dry-run");
                println!("  5. Run sync: ordersync sync");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Starter configuration written by `init`
pub fn starter_config() -> &'static str {
    r#"# ordersync configuration
# Incremental Tiny ERP order sync

environment = "development"

[application]
log_level = "info"

[provider]
base_url = "https://api.tiny.com.br/api2"
token = "${TINY_API_TOKEN}"
tls_verify = true
timeout_seconds = 30

[provider.retry]
# Total attempts per call
max_retries = 3
delay_ms = 1000

[provider.rate_limit]
# Minimum spacing between product lookups
min_interval_ms = 1200

[sync]
# max_pages = 10
dry_run = false

[state]
backend = "file"
checkpoint_path = "last_processed_order_number.txt"
# backend = "postgresql"
# source_name = "tiny"
# skip_ledger_path = "logs/skipped.jsonl"

[destination]
schema = "tiny"
table_prefix = "tiny"

[destination.postgresql]
connection_string = "${ORDERSYNC_PG_CONNECTION}"
max_connections = 4
connection_timeout_seconds = 30
statement_timeout_seconds = 300

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
}
