//! End-to-end sync runs against in-memory provider, sink and checkpoint fakes

use async_trait::async_trait;
use ordersync::adapters::database::{CheckpointStore, RecordSink};
use ordersync::adapters::file::SkipLedgerFile;
use ordersync::adapters::tiny::{
    OrderPage, OrderSource, RateLimiter, RejectedEntry, RetryPolicy, TinyClient,
};
use ordersync::config::{secret_string, DestinationConfig, PostgreSQLConfig, SyncSettings};
use ordersync::core::sync::{SkipScope, SyncCoordinator, SyncOutcome};
use ordersync::core::transform::{CellValue, TableSchema, TypedRow};
use ordersync::domain::{
    OrderDetail, OrderId, OrderItem, OrderSummary, ProductDetail, ProductId, ProviderError,
    Result, SequenceNumber, SyncError,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// Column positions in the typed rows
const SEQ: usize = 3;
const ORDER_DISCOUNT: usize = 7;
const ITEM_PRODUCT: usize = 5;
const ITEM_DISCOUNT: usize = 8;
const ITEM_COST: usize = 10;
const ITEM_CAT_PRIMARY: usize = 11;
const ITEM_CAT_SECONDARY: usize = 12;

#[derive(Default)]
struct FakeSource {
    pages: HashMap<u32, Vec<u64>>,
    rejected: HashMap<u32, Vec<RejectedEntry>>,
    total_pages: u32,
    failing_pages: HashSet<u32>,
    failing_orders: HashSet<u64>,
    order_discounts: HashMap<u64, String>,
    items: HashMap<u64, Vec<(&'static str, &'static str)>>,
    products: HashMap<&'static str, ProductDetail>,
    failing_products: HashSet<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_pages(total_pages: u32, pages: &[(u32, &[u64])]) -> Self {
        Self {
            total_pages,
            pages: pages.iter().map(|(n, seqs)| (*n, seqs.to_vec())).collect(),
            ..Default::default()
        }
    }

    fn product(mut self, id: &'static str, cost: &str, category: Option<&str>) -> Self {
        self.products.insert(
            id,
            ProductDetail {
                cost_price: cost.to_string(),
                category: category.map(str::to_string),
            },
        );
        self
    }

    fn items(mut self, seq: u64, items: &[(&'static str, &'static str)]) -> Self {
        self.items.insert(seq, items.to_vec());
        self
    }

    fn page_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with("page"))
            .cloned()
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn order_id(seq: u64) -> OrderId {
    OrderId::new(format!("9{seq}")).unwrap()
}

fn seq_of(id: &OrderId) -> u64 {
    id.as_str()[1..].parse().unwrap()
}

fn unavailable(what: &str) -> ProviderError {
    ProviderError::ServerError {
        status: 503,
        message: format!("{what} unavailable"),
    }
}

#[async_trait]
impl OrderSource for FakeSource {
    async fn search_orders(&self, page: u32) -> std::result::Result<OrderPage, ProviderError> {
        self.record(format!("page {page}"));
        if self.failing_pages.contains(&page) {
            return Err(unavailable("listing"));
        }
        let orders = self
            .pages
            .get(&page)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|seq| OrderSummary {
                sequence_number: SequenceNumber::new(seq),
                order_id: order_id(seq),
                order_date: "01/03/2024".to_string(),
                seller_id: Some("42".to_string()),
            })
            .collect();
        Ok(OrderPage {
            page,
            total_pages: self.total_pages,
            orders,
            rejected: self.rejected.get(&page).cloned().unwrap_or_default(),
        })
    }

    async fn get_order(&self, id: &OrderId) -> std::result::Result<OrderDetail, ProviderError> {
        let seq = seq_of(id);
        self.record(format!("order {seq}"));
        if self.failing_orders.contains(&seq) {
            return Err(unavailable("order"));
        }
        let items = self
            .items
            .get(&seq)
            .cloned()
            .unwrap_or_else(|| vec![("p-default", "1,00")])
            .into_iter()
            .map(|(product, discount)| OrderItem {
                product_id: ProductId::new(product).unwrap(),
                description: format!("item {product}"),
                quantity: "2".to_string(),
                discount: discount.to_string(),
                unit_price: "10.50".to_string(),
            })
            .collect();
        Ok(OrderDetail {
            total_products_amount: "21.00".to_string(),
            total_sale_amount: "19.77".to_string(),
            discount: self
                .order_discounts
                .get(&seq)
                .cloned()
                .unwrap_or_else(|| "0".to_string()),
            payment_method: "pix".to_string(),
            items,
        })
    }

    async fn get_product(&self, id: &ProductId) -> std::result::Result<ProductDetail, ProviderError> {
        self.record(format!("product {id}"));
        if self.failing_products.contains(id.as_str()) {
            return Err(unavailable("product"));
        }
        Ok(self
            .products
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| ProductDetail {
                cost_price: "5.00".to_string(),
                category: Some("Default >> Misc".to_string()),
            }))
    }

    fn base_url(&self) -> &str {
        "memory://tiny"
    }
}

#[derive(Default)]
struct MemorySink {
    tables: Mutex<HashMap<String, Vec<TypedRow>>>,
    fail: bool,
}

impl MemorySink {
    fn rows(&self, table: &str) -> Vec<TypedRow> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        self.tables
            .lock()
            .unwrap()
            .entry(schema.name.clone())
            .or_default();
        Ok(())
    }

    async fn append_rows(&self, schema: &TableSchema, rows: &[TypedRow]) -> Result<u64> {
        if self.fail {
            return Err(SyncError::Database("load rejected".to_string()));
        }
        self.tables
            .lock()
            .unwrap()
            .entry(schema.name.clone())
            .or_default()
            .extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    fn destination_name(&self) -> &str {
        "memory"
    }
}

#[derive(Default)]
struct MemoryCheckpoint {
    value: Mutex<Option<SequenceNumber>>,
    saves: Mutex<Vec<SequenceNumber>>,
    fail_save: bool,
}

impl MemoryCheckpoint {
    fn at(value: u64) -> Self {
        Self {
            value: Mutex::new(Some(SequenceNumber::new(value))),
            ..Default::default()
        }
    }

    fn current(&self) -> Option<u64> {
        self.value.lock().unwrap().map(|v| v.value())
    }

    fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpoint {
    async fn load(&self) -> Result<Option<SequenceNumber>> {
        Ok(*self.value.lock().unwrap())
    }

    async fn save(&self, value: SequenceNumber) -> Result<()> {
        if self.fail_save {
            return Err(SyncError::Checkpoint("disk full".to_string()));
        }
        self.saves.lock().unwrap().push(value);
        *self.value.lock().unwrap() = Some(value);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

fn destination() -> DestinationConfig {
    DestinationConfig {
        schema: "tiny".to_string(),
        table_prefix: "tiny".to_string(),
        postgresql: PostgreSQLConfig {
            connection_string: secret_string("postgresql://u:p@localhost/db".to_string()),
            max_connections: 1,
            connection_timeout_seconds: 1,
            statement_timeout_seconds: 1,
        },
    }
}

struct Harness {
    source: Arc<FakeSource>,
    sink: Arc<MemorySink>,
    checkpoint: Arc<MemoryCheckpoint>,
    coordinator: SyncCoordinator,
}

fn harness(source: FakeSource, checkpoint: MemoryCheckpoint, settings: SyncSettings) -> Harness {
    harness_with_sink(source, MemorySink::default(), checkpoint, settings)
}

fn harness_with_sink(
    source: FakeSource,
    sink: MemorySink,
    checkpoint: MemoryCheckpoint,
    settings: SyncSettings,
) -> Harness {
    let source = Arc::new(source);
    let sink = Arc::new(sink);
    let checkpoint = Arc::new(checkpoint);

    let client = TinyClient::with_source(
        source.clone(),
        RetryPolicy::new(2, Duration::ZERO),
        RateLimiter::new(Duration::ZERO),
    );
    let coordinator = SyncCoordinator::new(
        Arc::new(client),
        sink.clone(),
        checkpoint.clone(),
        &destination(),
        settings,
    );

    Harness {
        source,
        sink,
        checkpoint,
        coordinator,
    }
}

fn seqs(rows: &[TypedRow]) -> Vec<i64> {
    rows.iter()
        .map(|row| match &row[SEQ] {
            CellValue::Integer(v) => *v,
            other => panic!("sequence number not an integer: {other:?}"),
        })
        .collect()
}

fn text(cell: &CellValue) -> &str {
    match cell {
        CellValue::Text(s) => s,
        other => panic!("expected text, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stops_at_checkpoint_boundary() {
    let source = FakeSource::with_pages(3, &[(1, &[105, 103, 100, 98]), (2, &[97, 96])]);
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::Completed);
    assert_eq!(summary.new_orders, 2);
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![105, 103]);
    assert_eq!(seqs(&h.sink.rows("tiny-order-items")), vec![105, 103]);
    assert_eq!(summary.observed_max, Some(SequenceNumber::new(105)));
    assert_eq!(summary.committed_checkpoint, Some(SequenceNumber::new(105)));
    assert_eq!(h.checkpoint.current(), Some(105));
    assert_eq!(h.source.page_calls(), vec!["page 1".to_string()]);
}

#[tokio::test]
async fn test_no_row_at_or_below_checkpoint() {
    let source = FakeSource::with_pages(2, &[(1, &[120, 110]), (2, &[101, 100, 99])]);
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    h.coordinator.run().await.unwrap();

    let emitted = seqs(&h.sink.rows("tiny-orders"));
    assert_eq!(emitted, vec![120, 110, 101]);
    assert!(emitted.iter().all(|&s| s > 100));
    assert_eq!(h.checkpoint.current(), Some(120));
}

#[tokio::test]
async fn test_cold_start_walks_every_page() {
    let source = FakeSource::with_pages(2, &[(1, &[3, 2]), (2, &[1])]);
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.prior_checkpoint, SequenceNumber::new(0));
    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![3, 2, 1]);
    assert_eq!(h.checkpoint.current(), Some(3));
}

#[tokio::test]
async fn test_nothing_new_keeps_checkpoint() {
    let source = FakeSource::with_pages(1, &[(1, &[100, 98])]);
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::Completed);
    assert_eq!(summary.new_orders, 0);
    assert!(h.sink.rows("tiny-orders").is_empty());
    assert_eq!(summary.committed_checkpoint, None);
    assert_eq!(h.checkpoint.save_count(), 0);
    assert_eq!(h.checkpoint.current(), Some(100));
}

#[tokio::test]
async fn test_empty_listing() {
    let source = FakeSource::with_pages(0, &[]);
    let h = harness(source, MemoryCheckpoint::at(7), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::Completed);
    assert_eq!(summary.observed_max, None);
    assert_eq!(h.checkpoint.save_count(), 0);
}

#[tokio::test]
async fn test_initial_listing_failure_leaves_everything_untouched() {
    let mut source = FakeSource::with_pages(1, &[(1, &[105])]);
    source.failing_pages.insert(1);
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::SourceUnavailable);
    assert_eq!(summary.order_rows, 0);
    assert_eq!(summary.skips.count(SkipScope::Page), 1);
    assert!(h.sink.rows("tiny-orders").is_empty());
    assert_eq!(h.checkpoint.save_count(), 0);
    assert_eq!(h.checkpoint.current(), Some(100));
    // two attempts, no second page
    assert_eq!(h.source.page_calls().len(), 2);
}

#[tokio::test]
async fn test_unavailable_page_is_skipped() {
    let mut source = FakeSource::with_pages(3, &[(1, &[100, 99]), (3, &[80, 40])]);
    source.failing_pages.insert(2);
    let h = harness(source, MemoryCheckpoint::at(50), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::CompletedWithSkips);
    assert_eq!(summary.skips.count(SkipScope::Page), 1);
    assert_eq!(summary.skips.entries()[0].page, Some(2));
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![100, 99, 80]);
    assert_eq!(h.checkpoint.current(), Some(100));
}

#[tokio::test]
async fn test_max_pages_caps_listing() {
    let source = FakeSource::with_pages(3, &[(1, &[30, 29]), (2, &[28, 27]), (3, &[26])]);
    let settings = SyncSettings {
        max_pages: Some(2),
        dry_run: false,
    };
    let h = harness(source, MemoryCheckpoint::default(), settings);

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![30, 29, 28, 27]);
    assert_eq!(h.source.page_calls(), vec!["page 1", "page 2"]);
}

#[tokio::test]
async fn test_unavailable_order_does_not_stop_siblings() {
    let mut source = FakeSource::with_pages(1, &[(1, &[12, 11, 10])]);
    source.failing_orders.insert(11);
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::CompletedWithSkips);
    assert_eq!(summary.skips.count(SkipScope::Order), 1);
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![12, 10]);
    // the skipped order still counts towards the checkpoint
    assert_eq!(h.checkpoint.current(), Some(12));
}

#[tokio::test]
async fn test_item_failure_isolated_to_item() {
    let mut source = FakeSource::with_pages(1, &[(1, &[105])])
        .items(105, &[("p-ok", "0"), ("p-bad", "0"), ("p-ok2", "0")]);
    source.failing_products.insert("p-bad");
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::CompletedWithSkips);
    assert_eq!(summary.skips.count(SkipScope::Item), 1);
    assert_eq!(summary.skips.entries()[0].product_id.as_deref(), Some("p-bad"));

    let orders = h.sink.rows("tiny-orders");
    assert_eq!(orders.len(), 1);

    let items = h.sink.rows("tiny-order-items");
    let products: Vec<&str> = items.iter().map(|r| text(&r[ITEM_PRODUCT])).collect();
    assert_eq!(products, vec!["p-ok", "p-ok2"]);
}

#[tokio::test]
async fn test_comma_decimals_normalized() {
    let mut source = FakeSource::with_pages(1, &[(1, &[5])]).items(5, &[("p1", "0,50")]);
    source.order_discounts.insert(5, "1,23".to_string());
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    h.coordinator.run().await.unwrap();

    let orders = h.sink.rows("tiny-orders");
    assert_eq!(orders[0][ORDER_DISCOUNT], CellValue::Float(1.23));

    let items = h.sink.rows("tiny-order-items");
    assert_eq!(items[0][ITEM_DISCOUNT], CellValue::Float(0.5));
}

#[tokio::test]
async fn test_categories_split_and_defaulted() {
    let source = FakeSource::with_pages(1, &[(1, &[9])])
        .items(9, &[("p-both", "0"), ("p-one", "0"), ("p-none", "0")])
        .product("p-both", "3.10", Some("Bebidas >> Sucos"))
        .product("p-one", "1.00", Some("Bebidas"))
        .product("p-none", "", None);
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    h.coordinator.run().await.unwrap();

    let items = h.sink.rows("tiny-order-items");
    let cats: Vec<(&str, &str)> = items
        .iter()
        .map(|r| (text(&r[ITEM_CAT_PRIMARY]), text(&r[ITEM_CAT_SECONDARY])))
        .collect();
    assert_eq!(
        cats,
        vec![
            ("Bebidas", "Sucos"),
            ("Bebidas", "Unknown"),
            ("Unknown", "Unknown"),
        ]
    );
    assert_eq!(items[0][ITEM_COST], CellValue::Float(3.10));
    assert_eq!(items[2][ITEM_COST], CellValue::Null);
}

#[tokio::test]
async fn test_untypeable_discount_does_not_block_sync() {
    let mut source = FakeSource::with_pages(1, &[(1, &[205, 204])]);
    source.order_discounts.insert(205, "5%".to_string());
    let h = harness(source, MemoryCheckpoint::at(200), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::CompletedWithSkips);
    let orders = h.sink.rows("tiny-orders");
    assert_eq!(seqs(&orders), vec![205, 204]);
    assert_eq!(orders[0][ORDER_DISCOUNT], CellValue::Null);
    assert_eq!(orders[1][ORDER_DISCOUNT], CellValue::Float(0.0));
    assert_eq!(h.checkpoint.current(), Some(205));

    assert_eq!(summary.skips.count(SkipScope::Field), 1);
    let skip = &summary.skips.entries()[0];
    assert_eq!(skip.order_id.as_deref(), Some("9205"));
    assert_eq!(skip.sequence_number, Some(SequenceNumber::new(205)));
    assert!(skip.reason.starts_with("tiny-orders.discount: invalid number '5%'"));

    // the next run starts past the bad order instead of failing on it again
    let summary = h.coordinator.run().await.unwrap();
    assert_eq!(summary.outcome, SyncOutcome::Completed);
    assert_eq!(summary.new_orders, 0);
    assert_eq!(h.sink.rows("tiny-orders").len(), 2);
}

#[tokio::test]
async fn test_untypeable_item_value_records_product() {
    let source = FakeSource::with_pages(1, &[(1, &[8])]).items(8, &[("p1", "0"), ("p2", "n/a")]);
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    let items = h.sink.rows("tiny-order-items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1][ITEM_DISCOUNT], CellValue::Null);
    assert_eq!(summary.skips.count(SkipScope::Field), 1);
    assert_eq!(summary.skips.entries()[0].product_id.as_deref(), Some("p2"));
    assert_eq!(h.checkpoint.current(), Some(8));
}

#[tokio::test]
async fn test_unreadable_listing_entries_are_recorded() {
    let mut source = FakeSource::with_pages(1, &[(1, &[105, 103, 98])]);
    source.rejected.insert(
        1,
        vec![
            RejectedEntry {
                sequence_number: Some(SequenceNumber::new(104)),
                order_id: None,
                reason: "Order id must not be empty".to_string(),
            },
            RejectedEntry {
                sequence_number: None,
                order_id: Some("777".to_string()),
                reason: "Invalid sequence number ''".to_string(),
            },
            RejectedEntry {
                sequence_number: Some(SequenceNumber::new(99)),
                order_id: None,
                reason: "Order id must not be empty".to_string(),
            },
        ],
    );
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.outcome, SyncOutcome::CompletedWithSkips);
    assert_eq!(seqs(&h.sink.rows("tiny-orders")), vec![105, 103]);

    // the entry below the checkpoint was synced by an earlier run
    assert_eq!(summary.skips.count(SkipScope::Order), 2);
    let first = &summary.skips.entries()[0];
    assert_eq!(first.page, Some(1));
    assert_eq!(first.sequence_number, Some(SequenceNumber::new(104)));
    let second = &summary.skips.entries()[1];
    assert_eq!(second.sequence_number, None);
    assert_eq!(second.order_id.as_deref(), Some("777"));

    assert_eq!(h.checkpoint.current(), Some(105));
}

#[tokio::test]
async fn test_unreadable_newest_entry_feeds_checkpoint() {
    let mut source = FakeSource::with_pages(1, &[(1, &[103, 100])]);
    source.rejected.insert(
        1,
        vec![RejectedEntry {
            sequence_number: Some(SequenceNumber::new(107)),
            order_id: None,
            reason: "Order id must not be empty".to_string(),
        }],
    );
    let h = harness(source, MemoryCheckpoint::at(100), SyncSettings::default());

    let summary = h.coordinator.run().await.unwrap();

    assert_eq!(summary.observed_max, Some(SequenceNumber::new(107)));
    assert_eq!(summary.skips.count(SkipScope::Order), 1);
    assert_eq!(h.checkpoint.current(), Some(107));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let source = FakeSource::with_pages(1, &[(1, &[3, 2])]);
    let settings = SyncSettings {
        max_pages: None,
        dry_run: true,
    };
    let h = harness(source, MemoryCheckpoint::at(1), settings);

    let summary = h.coordinator.run().await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.order_rows, 2);
    assert_eq!(summary.orders_uploaded, 0);
    assert!(h.sink.rows("tiny-orders").is_empty());
    assert_eq!(h.checkpoint.save_count(), 0);
    assert_eq!(h.checkpoint.current(), Some(1));
}

#[tokio::test]
async fn test_upload_failure_keeps_checkpoint() {
    let source = FakeSource::with_pages(1, &[(1, &[3])]);
    let sink = MemorySink {
        fail: true,
        ..Default::default()
    };
    let h = harness_with_sink(source, sink, MemoryCheckpoint::at(1), SyncSettings::default());

    let err = h.coordinator.run().await.unwrap_err();

    assert!(matches!(err, SyncError::Database(_)));
    assert!(err.is_persistence_failure());
    assert_eq!(h.checkpoint.current(), Some(1));
}

#[tokio::test]
async fn test_checkpoint_save_failure_is_fatal() {
    let source = FakeSource::with_pages(1, &[(1, &[3])]);
    let checkpoint = MemoryCheckpoint {
        fail_save: true,
        ..MemoryCheckpoint::at(1)
    };
    let h = harness(source, checkpoint, SyncSettings::default());

    let err = h.coordinator.run().await.unwrap_err();

    assert!(matches!(err, SyncError::Checkpoint(_)));
    // rows were already appended
    assert_eq!(h.sink.rows("tiny-orders").len(), 1);
}

#[tokio::test]
async fn test_skip_ledger_file_receives_skips() {
    let dir = TempDir::new().unwrap();
    let ledger_path = dir.path().join("skips.jsonl");

    let mut source = FakeSource::with_pages(1, &[(1, &[4, 3])]);
    source.failing_orders.insert(3);
    let h = harness(source, MemoryCheckpoint::default(), SyncSettings::default());
    let coordinator = h
        .coordinator
        .with_skip_ledger(SkipLedgerFile::new(&ledger_path));

    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.skips.len(), 1);

    let contents = std::fs::read_to_string(&ledger_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["scope"], "order");
    assert_eq!(record["order_id"], "93");
}
