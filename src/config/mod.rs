//! Configuration management for ordersync.
//!
//! TOML configuration with `${VAR_NAME}` environment substitution, `ORDERSYNC_*`
//! overrides, serde defaults for optional settings and per-section validation.
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [provider]
//! base_url = "https://api.tiny.com.br/api2"
//! token = "${TINY_API_TOKEN}"
//!
//! [provider.rate_limit]
//! min_interval_ms = 1200
//!
//! [state]
//! backend = "file"
//! checkpoint_path = "/var/lib/ordersync/last_processed_order_number.txt"
//!
//! [destination]
//! schema = "z316_tiny"
//! table_prefix = "z316-tiny"
//!
//! [destination.postgresql]
//! connection_string = "${ORDERSYNC_PG_URL}"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use ordersync::config::load_config;
//!
//! # fn example() {
//! match load_config("ordersync.toml") {
//!     Ok(config) => println!("Orders table: {}", config.destination.orders_table()),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DestinationConfig, Environment, LoggingConfig, PostgreSQLConfig,
    ProviderConfig, RateLimitConfig, RetryConfig, StateBackend, StateConfig, SyncConfig,
    SyncSettings,
};
pub use secret::{secret_string, SecretString, SecretValue};
