//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output with `RUST_LOG` support
//! - JSON lines to a rotating local file (daily or hourly)
//! - Helper macros for recurring events
//!
//! # Example
//!
//! ```no_run
//! use ordersync::logging::init_logging;
//! use ordersync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(page = 1, "Listing orders");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a sync run
///
/// # Example
///
/// ```no_run
/// use ordersync::log_sync_start;
/// use ordersync::domain::SequenceNumber;
///
/// log_sync_start!(SequenceNumber::new(100), false);
/// ```
#[macro_export]
macro_rules! log_sync_start {
    ($checkpoint:expr, $dry_run:expr) => {
        tracing::info!(
            checkpoint = %$checkpoint,
            dry_run = $dry_run,
            "Starting sync"
        );
    };
}

/// Log the completion of a sync run
///
/// # Example
///
/// ```no_run
/// use ordersync::log_sync_complete;
/// use std::time::Duration;
///
/// log_sync_complete!(12, 31, Duration::from_secs(40));
/// ```
#[macro_export]
macro_rules! log_sync_complete {
    ($orders:expr, $items:expr, $duration:expr) => {
        tracing::info!(
            orders = $orders,
            items = $items,
            duration_ms = $duration.as_millis() as u64,
            "Sync completed"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use ordersync::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying request"
        );
    };
}
