//! Order domain models
//!
//! Provider payloads are kept as loosely typed text here. Type coercion happens once,
//! right before load, in [`crate::core::transform::coerce`].

use super::ids::{OrderId, ProductId, SequenceNumber};
use serde::{Deserialize, Serialize};

/// One entry of the order listing (search) endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sync cursor
    pub sequence_number: SequenceNumber,

    /// Key for the order-detail lookup
    pub order_id: OrderId,

    /// Order date as sent by the provider (`dd/mm/YYYY`)
    pub order_date: String,

    /// Seller identifier, if the order has one
    pub seller_id: Option<String>,
}

/// Full order payload from the order-detail endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderDetail {
    pub total_products_amount: String,
    pub total_sale_amount: String,
    /// Locale formatted (comma decimal separator)
    pub discount: String,
    pub payment_method: String,
    pub items: Vec<OrderItem>,
}

/// Line item inside an [`OrderDetail`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub description: String,
    pub quantity: String,
    /// Locale formatted (comma decimal separator)
    pub discount: String,
    pub unit_price: String,
}

/// Product metadata from the product-detail endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductDetail {
    pub cost_price: String,

    /// Hierarchical category, e.g. `"Clothing >> Shirts"`
    pub category: Option<String>,
}

/// Fields shared by order and item rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowContext {
    /// Wall-clock extraction time (RFC 3339), not the order time
    pub timestamp: String,
    pub order_date: String,
    pub order_id: String,
    pub sequence_number: String,
    pub seller_id: String,
}

impl RowContext {
    /// Build the row context for an order
    pub fn from_summary(summary: &OrderSummary, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            order_date: summary.order_date.clone(),
            order_id: summary.order_id.to_string(),
            sequence_number: summary.sequence_number.to_string(),
            seller_id: summary.seller_id.clone().unwrap_or_default(),
        }
    }
}

/// Load-ready projection of an order, buffered as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    #[serde(flatten)]
    pub context: RowContext,
    pub total_products_amount: String,
    pub total_sale_amount: String,
    pub discount: String,
    pub payment_method: String,
}

/// Load-ready projection of an order item, buffered as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    #[serde(flatten)]
    pub context: RowContext,
    pub product_id: String,
    pub description: String,
    pub quantity: String,
    pub discount: String,
    pub unit_price: String,
    pub cost_price: String,
    pub category_primary: String,
    pub category_secondary: String,
}

impl ItemRow {
    /// Sequence number of the parent order
    pub fn sequence_number(&self) -> &str {
        &self.context.sequence_number
    }
}

impl OrderRow {
    /// Sequence number of the order
    pub fn sequence_number(&self) -> &str {
        &self.context.sequence_number
    }
}
