//! Incremental sync orchestration
//!
//! - [`coordinator`] - Run coordinator
//! - [`lister`] - Newest-first listing with early stop at the checkpoint
//! - [`enricher`] - Order and product lookups into text rows
//! - [`run_state`] - Prior checkpoint, running maximum and boundary flag
//! - [`summary`] - Run summary and skip ledger

pub mod coordinator;
pub mod enricher;
pub mod lister;
pub mod run_state;
pub mod summary;

pub use coordinator::SyncCoordinator;
pub use enricher::{OrderEnricher, RowBuffers};
pub use lister::{Listing, OrderLister};
pub use run_state::RunState;
pub use summary::{SkipLedger, SkipRecord, SkipScope, SyncOutcome, SyncSummary};
