//! Sync summary and skip ledger
//!
//! Every page, order or item dropped after exhausting its retries is recorded in the
//! [`SkipLedger`] carried by the [`SyncSummary`], along with listing entries that could
//! not be read and values loaded as NULL.

use crate::domain::{OrderSummary, ProductId, ProviderError, SequenceNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipScope {
    /// A listing page (every order on it was missed)
    Page,
    /// An order and all of its items
    Order,
    /// A single order item
    Item,
    /// A single value loaded as NULL; its row was still loaded
    Field,
}

/// One skipped unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub scope: SkipScope,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<SequenceNumber>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    pub attempts: usize,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered list of skipped work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkipLedger {
    entries: Vec<SkipRecord>,
}

impl SkipLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listing page that stayed unavailable
    pub fn record_page(&mut self, page: u32, attempts: usize, error: &ProviderError) {
        self.entries.push(SkipRecord {
            scope: SkipScope::Page,
            page: Some(page),
            order_id: None,
            sequence_number: None,
            product_id: None,
            attempts,
            reason: error.to_string(),
            recorded_at: Utc::now(),
        });
    }

    /// Record an order whose detail stayed unavailable
    pub fn record_order(&mut self, order: &OrderSummary, attempts: usize, error: &ProviderError) {
        self.entries.push(SkipRecord {
            scope: SkipScope::Order,
            page: None,
            order_id: Some(order.order_id.to_string()),
            sequence_number: Some(order.sequence_number),
            product_id: None,
            attempts,
            reason: error.to_string(),
            recorded_at: Utc::now(),
        });
    }

    /// Record a listing entry that could not be read as an order
    pub fn record_listing_entry(
        &mut self,
        page: u32,
        sequence_number: Option<SequenceNumber>,
        order_id: Option<String>,
        reason: &str,
    ) {
        self.entries.push(SkipRecord {
            scope: SkipScope::Order,
            page: Some(page),
            order_id,
            sequence_number,
            product_id: None,
            attempts: 1,
            reason: reason.to_string(),
            recorded_at: Utc::now(),
        });
    }

    /// Record a value that was loaded as NULL
    pub fn record_field(
        &mut self,
        order_id: &str,
        sequence_number: Option<SequenceNumber>,
        product_id: Option<&str>,
        reason: String,
    ) {
        self.entries.push(SkipRecord {
            scope: SkipScope::Field,
            page: None,
            order_id: Some(order_id.to_string()),
            sequence_number,
            product_id: product_id.map(str::to_string),
            attempts: 1,
            reason,
            recorded_at: Utc::now(),
        });
    }

    /// Record an item whose product stayed unavailable
    pub fn record_item(
        &mut self,
        order: &OrderSummary,
        product_id: &ProductId,
        attempts: usize,
        error: &ProviderError,
    ) {
        self.entries.push(SkipRecord {
            scope: SkipScope::Item,
            page: None,
            order_id: Some(order.order_id.to_string()),
            sequence_number: Some(order.sequence_number),
            product_id: Some(product_id.to_string()),
            attempts,
            reason: error.to_string(),
            recorded_at: Utc::now(),
        });
    }

    /// All records, in the order they were made
    pub fn entries(&self) -> &[SkipRecord] {
        &self.entries
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was skipped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records of one scope
    pub fn count(&self, scope: SkipScope) -> usize {
        self.entries.iter().filter(|e| e.scope == scope).count()
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Everything listed was loaded
    Completed,
    /// Loaded, but some work was skipped or some values loaded as NULL
    CompletedWithSkips,
    /// The first listing page never answered; nothing was loaded
    SourceUnavailable,
}

/// Summary of a sync run
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Checkpoint read at run start
    pub prior_checkpoint: SequenceNumber,

    /// Highest sequence number listed (including the boundary order)
    pub observed_max: Option<SequenceNumber>,

    /// Checkpoint written at run end, if it advanced
    pub committed_checkpoint: Option<SequenceNumber>,

    /// Listing pages fetched successfully
    pub pages_fetched: u32,

    /// Total pages reported by the provider
    pub total_pages: u32,

    /// Orders newer than the checkpoint
    pub new_orders: usize,

    /// Rows produced per table
    pub order_rows: usize,
    pub item_rows: usize,

    /// Rows written per table (0 in dry-run)
    pub orders_uploaded: u64,
    pub items_uploaded: u64,

    /// Skipped work
    pub skips: SkipLedger,

    pub outcome: SyncOutcome,
    pub dry_run: bool,
    pub duration: Duration,
}

impl SyncSummary {
    /// Create an empty summary for a run starting at `prior_checkpoint`
    pub fn new(prior_checkpoint: SequenceNumber, dry_run: bool) -> Self {
        Self {
            prior_checkpoint,
            observed_max: None,
            committed_checkpoint: None,
            pages_fetched: 0,
            total_pages: 0,
            new_orders: 0,
            order_rows: 0,
            item_rows: 0,
            orders_uploaded: 0,
            items_uploaded: 0,
            skips: SkipLedger::new(),
            outcome: SyncOutcome::Completed,
            dry_run,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the run loaded everything it listed
    pub fn is_clean(&self) -> bool {
        self.outcome == SyncOutcome::Completed
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_sync_complete!(self.order_rows, self.item_rows, self.duration);

        tracing::info!(
            outcome = ?self.outcome,
            dry_run = self.dry_run,
            prior_checkpoint = %self.prior_checkpoint,
            observed_max = ?self.observed_max.map(|s| s.value()),
            committed_checkpoint = ?self.committed_checkpoint.map(|s| s.value()),
            pages_fetched = self.pages_fetched,
            total_pages = self.total_pages,
            new_orders = self.new_orders,
            orders_uploaded = self.orders_uploaded,
            items_uploaded = self.items_uploaded,
            "Sync summary"
        );

        if !self.skips.is_empty() {
            tracing::warn!(
                pages = self.skips.count(SkipScope::Page),
                orders = self.skips.count(SkipScope::Order),
                items = self.skips.count(SkipScope::Item),
                fields = self.skips.count(SkipScope::Field),
                "Sync completed with skipped work"
            );
            for skip in self.skips.entries() {
                tracing::warn!(
                    scope = ?skip.scope,
                    page = ?skip.page,
                    order_id = ?skip.order_id,
                    product_id = ?skip.product_id,
                    reason = %skip.reason,
                    "Skipped"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;
    use std::str::FromStr;

    fn order() -> OrderSummary {
        OrderSummary {
            sequence_number: SequenceNumber::new(7),
            order_id: OrderId::from_str("70").unwrap(),
            order_date: "2024-03-01".to_string(),
            seller_id: None,
        }
    }

    #[test]
    fn test_ledger_counts_by_scope() {
        let err = ProviderError::Timeout("slow".to_string());
        let mut ledger = SkipLedger::new();
        ledger.record_page(2, 3, &err);
        ledger.record_order(&order(), 3, &err);
        ledger.record_item(&order(), &ProductId::from_str("5").unwrap(), 3, &err);
        ledger.record_item(&order(), &ProductId::from_str("6").unwrap(), 3, &err);

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.count(SkipScope::Page), 1);
        assert_eq!(ledger.count(SkipScope::Order), 1);
        assert_eq!(ledger.count(SkipScope::Item), 2);
        assert_eq!(ledger.entries()[3].product_id.as_deref(), Some("6"));
    }

    #[test]
    fn test_listing_entry_and_field_records() {
        let mut ledger = SkipLedger::new();
        ledger.record_listing_entry(3, Some(SequenceNumber::new(102)), None, "empty order id");
        ledger.record_field(
            "70",
            Some(SequenceNumber::new(7)),
            None,
            "tiny-orders.discount: invalid number '5%'".to_string(),
        );

        assert_eq!(ledger.count(SkipScope::Order), 1);
        assert_eq!(ledger.count(SkipScope::Field), 1);

        let entry = &ledger.entries()[0];
        assert_eq!(entry.page, Some(3));
        assert_eq!(entry.sequence_number, Some(SequenceNumber::new(102)));
        assert_eq!(entry.order_id, None);

        let json = serde_json::to_value(&ledger.entries()[1]).unwrap();
        assert_eq!(json["scope"], "field");
        assert_eq!(json["order_id"], "70");
    }

    #[test]
    fn test_skip_record_serialization() {
        let mut ledger = SkipLedger::new();
        ledger.record_page(4, 3, &ProviderError::ConnectionFailed("reset".to_string()));

        let json = serde_json::to_value(&ledger.entries()[0]).unwrap();
        assert_eq!(json["scope"], "page");
        assert_eq!(json["page"], 4);
        assert!(json.get("order_id").is_none());
    }

    #[test]
    fn test_new_summary_is_clean() {
        let summary = SyncSummary::new(SequenceNumber::new(1), false);
        assert!(summary.is_clean());
        assert_eq!(summary.committed_checkpoint, None);
    }
}
