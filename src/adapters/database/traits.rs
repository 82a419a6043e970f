//! Persistence abstraction traits
//!
//! This module defines the traits that destination and checkpoint backends
//! must implement to work with ordersync.

use crate::core::transform::{TableSchema, TypedRow};
use crate::domain::{Result, SequenceNumber};
use async_trait::async_trait;

/// Destination for typed rows
///
/// Implementations append; rows already present are never updated or removed.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Test the destination connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the table described by `schema` exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created.
    async fn ensure_table(&self, schema: &TableSchema) -> Result<()>;

    /// Append rows to an existing table
    ///
    /// # Returns
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; no rows are kept in that case.
    async fn append_rows(&self, schema: &TableSchema, rows: &[TypedRow]) -> Result<u64>;

    /// Ensure the table exists, then append `rows`
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails.
    async fn upload(&self, schema: &TableSchema, rows: &[TypedRow]) -> Result<u64> {
        if rows.is_empty() {
            tracing::debug!(table = %schema.name, "No rows to upload");
            return Ok(0);
        }

        self.ensure_table(schema).await?;
        let written = self.append_rows(schema, rows).await?;

        tracing::info!(table = %schema.name, rows = written, "Upload complete");
        Ok(written)
    }

    /// Human-readable destination name (schema or dataset)
    fn destination_name(&self) -> &str;
}

/// Storage for the sync checkpoint
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load the stored checkpoint
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no checkpoint was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or holds a malformed value.
    async fn load(&self) -> Result<Option<SequenceNumber>>;

    /// Persist `value` as the new checkpoint, replacing the previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn save(&self, value: SequenceNumber) -> Result<()>;

    /// Where the checkpoint lives, for logs and the status command
    fn describe(&self) -> String;
}
