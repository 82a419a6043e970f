//! Per-order enrichment into load rows

use super::summary::SkipLedger;
use crate::adapters::tiny::{Fetch, TinyClient};
use crate::core::transform::{normalize_decimal, normalize_order_date, split_category};
use crate::domain::{ItemRow, OrderRow, OrderSummary, RowContext};
use chrono::{SecondsFormat, Utc};

/// Text rows buffered during extraction
#[derive(Debug, Clone, Default)]
pub struct RowBuffers {
    pub orders: Vec<OrderRow>,
    pub items: Vec<ItemRow>,
}

/// Turns order summaries into order and item rows
pub struct OrderEnricher<'a> {
    client: &'a TinyClient,
}

impl<'a> OrderEnricher<'a> {
    pub fn new(client: &'a TinyClient) -> Self {
        Self { client }
    }

    /// Fetch the order detail and its products, appending rows to `buffers`
    ///
    /// Returns `false` when the order detail was unavailable and nothing was emitted.
    /// A product that stays unavailable drops only its own item.
    pub async fn enrich(
        &self,
        order: &OrderSummary,
        buffers: &mut RowBuffers,
        skips: &mut SkipLedger,
    ) -> bool {
        let detail = match self.client.order_detail(&order.order_id).await {
            Fetch::Ready(detail) => detail,
            Fetch::Unavailable {
                attempts,
                last_error,
            } => {
                tracing::warn!(
                    order_id = %order.order_id,
                    sequence_number = %order.sequence_number,
                    error = %last_error,
                    "Skipping order, detail unavailable"
                );
                skips.record_order(order, attempts, &last_error);
                return false;
            }
        };

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut context = RowContext::from_summary(order, timestamp);
        context.order_date = normalize_order_date(&context.order_date);

        buffers.orders.push(OrderRow {
            context: context.clone(),
            total_products_amount: detail.total_products_amount,
            total_sale_amount: detail.total_sale_amount,
            discount: normalize_decimal(&detail.discount),
            payment_method: detail.payment_method,
        });

        let item_count = detail.items.len();
        for item in detail.items {
            let product = match self.client.product_detail(&item.product_id).await {
                Fetch::Ready(product) => product,
                Fetch::Unavailable {
                    attempts,
                    last_error,
                } => {
                    tracing::warn!(
                        order_id = %order.order_id,
                        product_id = %item.product_id,
                        error = %last_error,
                        "Skipping item, product unavailable"
                    );
                    skips.record_item(order, &item.product_id, attempts, &last_error);
                    continue;
                }
            };

            let (category_primary, category_secondary) =
                split_category(product.category.as_deref());

            buffers.items.push(ItemRow {
                context: context.clone(),
                product_id: item.product_id.to_string(),
                description: item.description,
                quantity: item.quantity,
                discount: normalize_decimal(&item.discount),
                unit_price: item.unit_price,
                cost_price: product.cost_price,
                category_primary,
                category_secondary,
            });
        }

        tracing::debug!(
            order_id = %order.order_id,
            sequence_number = %order.sequence_number,
            items = item_count,
            "Order enriched"
        );
        true
    }
}
