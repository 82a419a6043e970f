//! Local file persistence: the checkpoint file and the skip ledger

pub mod checkpoint;
pub mod ledger;

pub use checkpoint::FileCheckpointStore;
pub use ledger::SkipLedgerFile;
