//! Checkpoint manager
//!
//! Reads the checkpoint once at run start and writes it once at run end. A failed
//! read degrades to a cold start; a failed write is fatal.

use crate::adapters::database::traits::CheckpointStore;
use crate::domain::{Result, SequenceNumber, SyncError};
use std::sync::Arc;

/// Result of [`CheckpointManager::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The new value was persisted
    Advanced(SequenceNumber),
    /// Nothing newer than the prior checkpoint was observed
    Unchanged,
    /// Dry run; the value that would have been written
    Skipped(SequenceNumber),
}

/// Loads and commits the sync checkpoint
pub struct CheckpointManager {
    store: Arc<dyn CheckpointStore>,
}

impl CheckpointManager {
    /// Create a manager over a checkpoint backend
    pub fn new(store: Arc<dyn CheckpointStore>) -> Self {
        Self { store }
    }

    /// Backend description
    pub fn describe(&self) -> String {
        self.store.describe()
    }

    /// Load the checkpoint, or 0 when it is absent or unreadable
    pub async fn load_or_default(&self) -> SequenceNumber {
        match self.store.load().await {
            Ok(Some(value)) => {
                tracing::info!(
                    checkpoint = %value,
                    store = %self.store.describe(),
                    "Loaded checkpoint"
                );
                value
            }
            Ok(None) => {
                tracing::info!(
                    store = %self.store.describe(),
                    "No checkpoint found, starting from 0"
                );
                SequenceNumber::ZERO
            }
            Err(e) => {
                tracing::warn!(
                    store = %self.store.describe(),
                    error = %e,
                    "Failed to load checkpoint, starting from 0"
                );
                SequenceNumber::ZERO
            }
        }
    }

    /// Persist `next` when it advances past `prior`
    ///
    /// `next` is the run's observed maximum; `None` means no orders were listed.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Checkpoint` if the backend write fails.
    pub async fn commit(
        &self,
        prior: SequenceNumber,
        next: Option<SequenceNumber>,
        dry_run: bool,
    ) -> Result<CommitOutcome> {
        let next = match next.map(|n| n.max(prior)) {
            Some(n) if n > prior => n,
            _ => {
                tracing::info!(checkpoint = %prior, "Checkpoint unchanged");
                return Ok(CommitOutcome::Unchanged);
            }
        };

        if dry_run {
            tracing::info!(
                prior = %prior,
                next = %next,
                "DRY RUN: Would save checkpoint"
            );
            return Ok(CommitOutcome::Skipped(next));
        }

        self.store.save(next).await.map_err(|e| match e {
            SyncError::Checkpoint(_) => e,
            other => SyncError::Checkpoint(other.to_string()),
        })?;

        tracing::info!(
            prior = %prior,
            checkpoint = %next,
            store = %self.store.describe(),
            "Checkpoint saved"
        );
        Ok(CommitOutcome::Advanced(next))
    }
}
