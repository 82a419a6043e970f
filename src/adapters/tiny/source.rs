//! Order source trait definition
//!
//! `OrderSource` abstracts the three provider endpoints the sync needs. Each method
//! performs a single attempt; retry and rate limiting are layered on top by
//! [`super::TinyClient`].

use crate::domain::{
    OrderDetail, OrderId, OrderSummary, ProductDetail, ProductId, ProviderError, SequenceNumber,
};
use async_trait::async_trait;

/// One page of the newest-first order listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPage {
    /// 1-based page number
    pub page: u32,

    /// Total number of pages reported by the provider (0 when there are no orders)
    pub total_pages: u32,

    /// Orders on this page, newest first
    pub orders: Vec<OrderSummary>,

    /// Entries that could not be read as orders
    pub rejected: Vec<RejectedEntry>,
}

/// A listing entry that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Sequence number, when the entry carried a readable one
    pub sequence_number: Option<SequenceNumber>,

    /// Raw order id as listed
    pub order_id: Option<String>,

    pub reason: String,
}

impl OrderPage {
    /// Page with no orders and no further pages
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            total_pages: 0,
            orders: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Trait for order provider implementations
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// List one page of orders sorted by sequence number, descending
    async fn search_orders(&self, page: u32) -> Result<OrderPage, ProviderError>;

    /// Fetch the full payload of one order
    async fn get_order(&self, order_id: &OrderId) -> Result<OrderDetail, ProviderError>;

    /// Fetch cost and category for one product
    async fn get_product(&self, product_id: &ProductId) -> Result<ProductDetail, ProviderError>;

    /// Base URL, for logging
    fn base_url(&self) -> &str;
}
