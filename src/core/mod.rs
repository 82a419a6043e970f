//! Core business logic for ordersync.
//!
//! # Modules
//!
//! - [`sync`] - Run coordination, listing, enrichment and the run summary
//! - [`state`] - Checkpoint loading and committing
//! - [`transform`] - Field normalization and load-time coercion
//!
//! # Sync Workflow
//!
//! 1. **Load State**: Read the checkpoint (0 on a cold start)
//! 2. **List**: Walk the order listing newest first until an already-synced order
//! 3. **Enrich**: Fetch each order's detail and its products (rate limited)
//! 4. **Coerce**: Type every buffered row against the destination schemas
//! 5. **Load**: Append orders, then items
//! 6. **Checkpoint**: Save the highest sequence number seen
//!
//! # Example
//!
//! ```rust,no_run
//! use ordersync::config::load_config;
//! use ordersync::core::sync::SyncCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ordersync.toml")?;
//! let coordinator = SyncCoordinator::from_config(&config)?;
//!
//! let summary = coordinator.run().await?;
//! println!("Orders: {}", summary.order_rows);
//! println!("Items: {}", summary.item_rows);
//! println!("Skipped: {}", summary.skips.len());
//! # Ok(())
//! # }
//! ```

pub mod state;
pub mod sync;
pub mod transform;
