//! Sync coordinator - main orchestrator for one incremental run
//!
//! load checkpoint → list new orders → enrich → coerce → upload orders, then items →
//! commit checkpoint. The two uploads are independent; a failure of the second leaves
//! the first in place and the checkpoint untouched, so the next run re-reads the same
//! orders.

use super::enricher::{OrderEnricher, RowBuffers};
use super::lister::OrderLister;
use super::run_state::RunState;
use super::summary::{SkipLedger, SyncOutcome, SyncSummary};
use crate::adapters::database::create_sink_and_checkpoint;
use crate::adapters::database::traits::{CheckpointStore, RecordSink};
use crate::adapters::file::SkipLedgerFile;
use crate::adapters::tiny::TinyClient;
use crate::config::{DestinationConfig, SyncConfig, SyncSettings};
use crate::core::state::{CheckpointManager, CommitOutcome};
use crate::core::transform::{coerce_items, coerce_orders, CellDefault, TableSchema};
use crate::domain::{Result, RowContext, SequenceNumber};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Sync coordinator
pub struct SyncCoordinator {
    client: Arc<TinyClient>,
    sink: Arc<dyn RecordSink>,
    checkpoints: CheckpointManager,
    orders_table: TableSchema,
    items_table: TableSchema,
    settings: SyncSettings,
    skip_ledger: Option<SkipLedgerFile>,
}

impl SyncCoordinator {
    /// Create a coordinator from explicit collaborators
    pub fn new(
        client: Arc<TinyClient>,
        sink: Arc<dyn RecordSink>,
        checkpoint_store: Arc<dyn CheckpointStore>,
        destination: &DestinationConfig,
        settings: SyncSettings,
    ) -> Self {
        Self {
            client,
            sink,
            checkpoints: CheckpointManager::new(checkpoint_store),
            orders_table: TableSchema::orders(destination.orders_table()),
            items_table: TableSchema::items(destination.items_table()),
            settings,
            skip_ledger: None,
        }
    }

    /// Append skipped work to `ledger` after each run
    pub fn with_skip_ledger(mut self, ledger: SkipLedgerFile) -> Self {
        self.skip_ledger = Some(ledger);
        self
    }

    /// Build every collaborator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the provider or PostgreSQL client cannot be created.
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        let client = Arc::new(TinyClient::new(&config.provider)?);
        let (sink, checkpoint_store) = create_sink_and_checkpoint(config)?;

        let coordinator = Self::new(
            client,
            sink,
            checkpoint_store,
            &config.destination,
            config.sync.clone(),
        );

        Ok(match &config.state.skip_ledger_path {
            Some(path) => coordinator.with_skip_ledger(SkipLedgerFile::new(path)),
            None => coordinator,
        })
    }

    /// Record sink in use
    pub fn sink(&self) -> &Arc<dyn RecordSink> {
        &self.sink
    }

    /// Checkpoint manager in use
    pub fn checkpoints(&self) -> &CheckpointManager {
        &self.checkpoints
    }

    /// Execute one sync run
    ///
    /// An unreachable order listing is not an error: the summary reports
    /// [`SyncOutcome::SourceUnavailable`] and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Coercion` before any upload if a buffered row does not fit
    /// its table, `SyncError::Database` if an upload fails and `SyncError::Checkpoint`
    /// if the checkpoint cannot be saved. Single values that cannot be typed are
    /// loaded as NULL and recorded in the skip ledger.
    pub async fn run(&self) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let dry_run = self.settings.dry_run;

        let prior = self.checkpoints.load_or_default().await;
        crate::log_sync_start!(prior, dry_run);

        let mut state = RunState::new(prior);
        let mut summary = SyncSummary::new(prior, dry_run);

        let listing = OrderLister::new(&self.client, self.settings.max_pages)
            .list_new_orders(&mut state, &mut summary.skips)
            .await;

        summary.total_pages = listing.total_pages;
        summary.pages_fetched = listing.pages_fetched;
        summary.new_orders = listing.orders.len();
        summary.observed_max = state.running_max();

        if listing.source_unavailable {
            summary.outcome = SyncOutcome::SourceUnavailable;
            self.flush_skip_ledger(&summary).await;
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        tracing::info!(
            new_orders = listing.orders.len(),
            boundary_reached = state.boundary_reached(),
            "Listing complete"
        );

        let enricher = OrderEnricher::new(&self.client);
        let mut buffers = RowBuffers::default();
        for order in &listing.orders {
            enricher.enrich(order, &mut buffers, &mut summary.skips).await;
        }
        summary.order_rows = buffers.orders.len();
        summary.item_rows = buffers.items.len();

        let orders = coerce_orders(&self.orders_table, &buffers.orders)?;
        for default in &orders.defaults {
            let context = &buffers.orders[default.row].context;
            record_default(&mut summary.skips, default, context, None);
        }
        let items = coerce_items(&self.items_table, &buffers.items)?;
        for default in &items.defaults {
            let row = &buffers.items[default.row];
            record_default(
                &mut summary.skips,
                default,
                &row.context,
                Some(row.product_id.as_str()),
            );
        }
        let (order_rows, item_rows) = (orders.rows, items.rows);

        if dry_run {
            tracing::info!(
                orders = order_rows.len(),
                items = item_rows.len(),
                destination = %self.sink.destination_name(),
                "DRY RUN: Would upload rows"
            );
        } else {
            summary.orders_uploaded = self.sink.upload(&self.orders_table, &order_rows).await?;
            summary.items_uploaded = self.sink.upload(&self.items_table, &item_rows).await?;
        }

        let committed = self
            .checkpoints
            .commit(prior, state.running_max(), dry_run)
            .await?;
        if let CommitOutcome::Advanced(value) = committed {
            summary.committed_checkpoint = Some(value);
        }

        summary.outcome = if summary.skips.is_empty() {
            SyncOutcome::Completed
        } else {
            SyncOutcome::CompletedWithSkips
        };

        self.flush_skip_ledger(&summary).await;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn flush_skip_ledger(&self, summary: &SyncSummary) {
        let Some(ledger) = &self.skip_ledger else {
            return;
        };
        if summary.dry_run || summary.skips.is_empty() {
            return;
        }

        if let Err(e) = ledger.append(summary.skips.entries()).await {
            tracing::warn!(
                path = %ledger.path().display(),
                error = %e,
                "Failed to write skip ledger"
            );
        }
    }
}

fn record_default(
    skips: &mut SkipLedger,
    default: &CellDefault,
    context: &RowContext,
    product_id: Option<&str>,
) {
    skips.record_field(
        &context.order_id,
        SequenceNumber::from_str(&context.sequence_number).ok(),
        product_id,
        default.describe(),
    );
}
