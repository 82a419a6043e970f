//! External system integrations for ordersync.
//!
//! - [`tiny`] - Tiny ERP API v2 client (search, order detail, product detail)
//! - [`database`] - Sink and checkpoint abstractions (trait-based)
//! - [`postgresql`] - PostgreSQL sink and checkpoint table
//! - [`file`] - File-backed checkpoint and skip ledger
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the sync core can
//! be driven by in-memory fakes in tests. The provider side splits into a
//! single-attempt [`tiny::OrderSource`] and the [`tiny::TinyClient`] that adds
//! retries and rate limiting on top of it.
//!
//! ```rust,no_run
//! use ordersync::adapters::tiny::TinyClient;
//! use ordersync::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ordersync.toml")?;
//! let client = TinyClient::new(&config.provider)?;
//!
//! let first_page = client.health_check().await?;
//! println!("{} pages of orders", first_page.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod file;
pub mod postgresql;
pub mod tiny;
