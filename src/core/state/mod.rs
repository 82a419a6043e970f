// Checkpoint state management

pub mod manager;

pub use manager::{CheckpointManager, CommitOutcome};
