//! PostgreSQL adapter implementing the persistence traits
//!
//! Implements [`RecordSink`] for the destination tables and [`CheckpointStore`] for
//! the `sync_checkpoints` table, both inside the configured destination schema.

use crate::adapters::database::traits::{CheckpointStore, RecordSink};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    create_checkpoint_table_sql, create_table_sql, qualified_name, select_checkpoint_sql,
    upsert_checkpoint_sql, CHECKPOINT_TABLE,
};
use crate::core::transform::{TableSchema, TypedRow};
use crate::domain::{Result, SequenceNumber, SyncError};
use async_trait::async_trait;
use pg_escape::quote_identifier;
use std::sync::Arc;

/// PostgreSQL implementation of the persistence traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
    schema: String,
    source_name: String,
}

impl PostgreSQLAdapter {
    /// Create a new adapter writing into `schema`
    ///
    /// `source_name` keys the checkpoint row.
    pub fn new(client: PostgreSQLClient, schema: &str, source_name: &str) -> Self {
        Self::new_with_arc(Arc::new(client), schema, source_name)
    }

    /// Create a new adapter with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>, schema: &str, source_name: &str) -> Self {
        Self {
            client,
            schema: schema.to_string(),
            source_name: source_name.to_string(),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client
            .batch_execute(&format!(
                "CREATE SCHEMA IF NOT EXISTS {}",
                quote_identifier(&self.schema)
            ))
            .await
    }
}

#[async_trait]
impl RecordSink for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        self.ensure_schema().await?;
        self.client
            .batch_execute(&create_table_sql(&self.schema, schema))
            .await?;

        tracing::debug!(
            schema = %self.schema,
            table = %schema.name,
            "Destination table ready"
        );
        Ok(())
    }

    async fn append_rows(&self, schema: &TableSchema, rows: &[TypedRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let written = self.client.copy_rows(&self.schema, schema, rows).await?;

        tracing::info!(
            table = %qualified_name(&self.schema, &schema.name),
            rows = written,
            "COPY complete"
        );
        Ok(written)
    }

    fn destination_name(&self) -> &str {
        &self.schema
    }
}

#[async_trait]
impl CheckpointStore for PostgreSQLAdapter {
    async fn load(&self) -> Result<Option<SequenceNumber>> {
        let map_err = |e: SyncError| SyncError::Checkpoint(e.to_string());

        self.ensure_schema().await.map_err(map_err)?;
        self.client
            .batch_execute(&create_checkpoint_table_sql(&self.schema))
            .await
            .map_err(map_err)?;

        let rows = self
            .client
            .query(&select_checkpoint_sql(&self.schema), &[&self.source_name])
            .await
            .map_err(map_err)?;

        match rows.first() {
            Some(row) => {
                let value: i64 = row.try_get(0).map_err(|e| {
                    SyncError::Checkpoint(format!("Invalid checkpoint row: {e}"))
                })?;
                let value = u64::try_from(value).map_err(|_| {
                    SyncError::Checkpoint(format!("Negative checkpoint value {value}"))
                })?;
                Ok(Some(SequenceNumber::new(value)))
            }
            None => {
                tracing::debug!(source = %self.source_name, "No checkpoint row found");
                Ok(None)
            }
        }
    }

    async fn save(&self, value: SequenceNumber) -> Result<()> {
        let map_err = |e: SyncError| SyncError::Checkpoint(e.to_string());

        let stored = i64::try_from(value.value()).map_err(|_| {
            SyncError::Checkpoint(format!("Checkpoint {value} does not fit in BIGINT"))
        })?;

        self.ensure_schema().await.map_err(map_err)?;
        self.client
            .batch_execute(&create_checkpoint_table_sql(&self.schema))
            .await
            .map_err(map_err)?;
        self.client
            .execute(
                &upsert_checkpoint_sql(&self.schema),
                &[&self.source_name, &stored],
            )
            .await
            .map_err(map_err)?;

        tracing::debug!(source = %self.source_name, checkpoint = %value, "Checkpoint upserted");
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "{} ({} source={})",
            self.client.connection_string_safe(),
            qualified_name(&self.schema, CHECKPOINT_TABLE),
            self.source_name
        )
    }
}
