//! Persistence factory
//!
//! Builds the record sink and checkpoint store from configuration.

use crate::adapters::database::traits::{CheckpointStore, RecordSink};
use crate::adapters::file::FileCheckpointStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{StateBackend, SyncConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create the checkpoint store for the configured backend
///
/// # Errors
///
/// Returns an error if the PostgreSQL client cannot be created.
pub fn create_checkpoint_store(config: &SyncConfig) -> Result<Arc<dyn CheckpointStore>> {
    match config.state.backend {
        StateBackend::File => {
            tracing::debug!(path = %config.state.checkpoint_path, "Using file checkpoint store");
            let store = FileCheckpointStore::new(&config.state.checkpoint_path);
            Ok(Arc::new(store) as Arc<dyn CheckpointStore>)
        }
        StateBackend::PostgreSQL => {
            tracing::debug!("Using PostgreSQL checkpoint store");
            let client = PostgreSQLClient::new(config.destination.postgresql.clone())?;
            let adapter =
                PostgreSQLAdapter::new(client, &config.destination.schema, &config.state.source_name);
            Ok(Arc::new(adapter) as Arc<dyn CheckpointStore>)
        }
    }
}

/// Create the record sink and checkpoint store
///
/// With the PostgreSQL state backend both share one connection pool.
///
/// # Errors
///
/// Returns an error if the PostgreSQL client cannot be created.
pub fn create_sink_and_checkpoint(
    config: &SyncConfig,
) -> Result<(Arc<dyn RecordSink>, Arc<dyn CheckpointStore>)> {
    tracing::info!(schema = %config.destination.schema, "Creating PostgreSQL client");
    let client = Arc::new(PostgreSQLClient::new(config.destination.postgresql.clone())?);
    let adapter = Arc::new(PostgreSQLAdapter::new_with_arc(
        client,
        &config.destination.schema,
        &config.state.source_name,
    ));

    let checkpoint = match config.state.backend {
        StateBackend::File => Arc::new(FileCheckpointStore::new(&config.state.checkpoint_path))
            as Arc<dyn CheckpointStore>,
        StateBackend::PostgreSQL => adapter.clone() as Arc<dyn CheckpointStore>,
    };

    Ok((adapter as Arc<dyn RecordSink>, checkpoint))
}
