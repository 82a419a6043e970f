//! Persistence abstraction layer
//!
//! Trait-based seams for the destination store ([`RecordSink`]) and the sync
//! checkpoint ([`CheckpointStore`]), plus a factory building them from configuration.

pub mod factory;
pub mod traits;

pub use factory::{create_checkpoint_store, create_sink_and_checkpoint};
pub use traits::{CheckpointStore, RecordSink};
