// Ordersync - Tiny ERP order sync
// Copyright (c) 2025 Ordersync Contributors
// Licensed under the MIT License

//! # ordersync - incremental Tiny ERP order sync
//!
//! ordersync pulls sales orders and their line items from the Tiny ERP API,
//! enriches every item with product cost and category, and appends the result
//! to two tables in PostgreSQL. A persisted checkpoint (the highest order
//! sequence number already loaded) makes each run incremental.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Run coordination, listing, enrichment, transforms and checkpointing
//! - [`adapters`] - Tiny API client, PostgreSQL sink, file-backed state
//! - [`domain`] - Identifiers, order models and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ordersync::config::load_config;
//! use ordersync::core::sync::SyncCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ordersync.toml")?;
//!     let coordinator = SyncCoordinator::from_config(&config)?;
//!
//!     let summary = coordinator.run().await?;
//!     println!("Loaded {} orders, {} items", summary.order_rows, summary.item_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Incremental Sync
//!
//! The order listing is walked newest first. The walk stops at the first order
//! whose sequence number is at or below the checkpoint; everything newer is
//! enriched and loaded, then the checkpoint moves to the highest number seen.
//! Pages, orders and items that stay unavailable after retrying are recorded
//! in the run's skip ledger instead of failing the run.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`] with [`domain::SyncError`]:
//!
//! ```rust,no_run
//! use ordersync::domain::SyncError;
//!
//! fn example() -> Result<(), SyncError> {
//!     let _config = ordersync::config::load_config("ordersync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
