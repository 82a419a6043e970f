//! Sync command implementation
//!
//! This module implements the `sync` command: one incremental run from the
//! provider into the destination tables.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_OK, EXIT_PARTIAL, EXIT_UNREACHABLE};
use crate::config::{load_config, SyncConfig};
use crate::core::sync::{SkipScope, SyncCoordinator, SyncOutcome, SyncSummary};
use crate::domain::SyncError;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Extract and transform everything but skip the upload and checkpoint write
    #[arg(long)]
    pub dry_run: bool,

    /// Stop listing after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        if config.sync.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to the destination");
            println!();
        }

        let coordinator = match SyncCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sync coordinator");
                eprintln!("Failed to initialize sync: {e}");
                return Ok(EXIT_UNREACHABLE);
            }
        };

        if !config.sync.dry_run {
            if let Err(e) = coordinator.sink().test_connection().await {
                tracing::error!(error = %e, "Destination unreachable");
                eprintln!("Failed to connect to destination: {e}");
                return Ok(EXIT_UNREACHABLE);
            }
        }

        println!("🚀 Starting sync...");
        println!();

        let result = tokio::select! {
            result = coordinator.run() => result,
            Ok(()) = shutdown_signal.changed() => {
                tracing::warn!("Sync interrupted before completion; checkpoint not advanced");
                eprintln!("Sync interrupted; the checkpoint was not advanced");
                return Ok(EXIT_INTERRUPTED);
            }
        };

        match result {
            Ok(summary) => {
                print_summary(&summary);
                Ok(exit_code_for_outcome(summary.outcome))
            }
            Err(e) => {
                crate::log_error_with_context!(e, "sync run");
                eprintln!("Sync failed: {e}");
                Ok(exit_code_for_error(&e))
            }
        }
    }

    fn apply_overrides(&self, config: &mut SyncConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry run from CLI");
            config.sync.dry_run = true;
        }
        if let Some(max_pages) = self.max_pages {
            tracing::info!(max_pages, "Overriding page limit from CLI");
            config.sync.max_pages = Some(max_pages);
        }
    }
}

/// Exit code for a finished run
pub fn exit_code_for_outcome(outcome: SyncOutcome) -> i32 {
    match outcome {
        SyncOutcome::Completed => EXIT_OK,
        SyncOutcome::CompletedWithSkips => EXIT_PARTIAL,
        SyncOutcome::SourceUnavailable => EXIT_UNREACHABLE,
    }
}

/// Exit code for a failed run
pub fn exit_code_for_error(error: &SyncError) -> i32 {
    match error {
        e if e.is_persistence_failure() => EXIT_FATAL,
        SyncError::Configuration(_) => EXIT_CONFIG,
        SyncError::Provider(_) => EXIT_UNREACHABLE,
        _ => EXIT_FATAL,
    }
}

fn print_summary(summary: &SyncSummary) {
    println!("📊 Sync Summary:");
    println!("  Prior checkpoint: {}", summary.prior_checkpoint);
    match summary.observed_max {
        Some(max) => println!("  Highest order seen: {max}"),
        None => println!("  Highest order seen: -"),
    }
    match summary.committed_checkpoint {
        Some(value) => println!("  New checkpoint: {value}"),
        None => println!("  New checkpoint: unchanged"),
    }
    println!(
        "  Pages fetched: {} of {}",
        summary.pages_fetched, summary.total_pages
    );
    println!("  New orders: {}", summary.new_orders);
    println!("  Order rows: {}", summary.order_rows);
    println!("  Item rows: {}", summary.item_rows);
    if !summary.dry_run {
        println!("  Orders uploaded: {}", summary.orders_uploaded);
        println!("  Items uploaded: {}", summary.items_uploaded);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.skips.is_empty() {
        println!("⚠️  Skipped work:");
        println!("  Pages: {}", summary.skips.count(SkipScope::Page));
        println!("  Orders: {}", summary.skips.count(SkipScope::Order));
        println!("  Items: {}", summary.skips.count(SkipScope::Item));
        println!("  Values loaded as NULL: {}", summary.skips.count(SkipScope::Field));
        for (i, skip) in summary.skips.entries().iter().enumerate() {
            if i >= 10 {
                println!("    ... and {} more", summary.skips.len() - 10);
                break;
            }
            println!("    - {:?}: {}", skip.scope, skip.reason);
        }
        println!();
    }

    match summary.outcome {
        SyncOutcome::Completed => println!("✅ Sync completed"),
        SyncOutcome::CompletedWithSkips => println!("⚠️  Sync completed with skipped work"),
        SyncOutcome::SourceUnavailable => {
            println!("❌ Order listing unavailable; nothing was written")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderError;

    #[test]
    fn test_exit_code_for_outcome() {
        assert_eq!(exit_code_for_outcome(SyncOutcome::Completed), 0);
        assert_eq!(exit_code_for_outcome(SyncOutcome::CompletedWithSkips), 3);
        assert_eq!(exit_code_for_outcome(SyncOutcome::SourceUnavailable), 4);
    }

    #[test]
    fn test_exit_code_for_error() {
        assert_eq!(
            exit_code_for_error(&SyncError::Checkpoint("disk full".into())),
            5
        );
        assert_eq!(exit_code_for_error(&SyncError::Database("down".into())), 5);
        assert_eq!(
            exit_code_for_error(&SyncError::Configuration("bad".into())),
            2
        );
        assert_eq!(
            exit_code_for_error(&SyncError::Provider(ProviderError::Timeout("slow".into()))),
            4
        );
        assert_eq!(exit_code_for_error(&SyncError::Other("?".into())), 5);
    }

    #[test]
    fn test_apply_overrides() {
        let args = SyncArgs {
            dry_run: true,
            max_pages: Some(2),
        };
        let mut config = crate::config::parse_config(
            r#"
[provider]
base_url = "https://api.tiny.com.br/api2"
token = "t"

[destination.postgresql]
connection_string = "postgresql://u:p@localhost/db"
"#,
        )
        .unwrap();
        args.apply_overrides(&mut config);
        assert!(config.sync.dry_run);
        assert_eq!(config.sync.max_pages, Some(2));
    }
}
