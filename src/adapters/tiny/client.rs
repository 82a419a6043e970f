//! Provider client with retry and rate limiting
//!
//! Wraps an [`OrderSource`] so every call goes through the retry policy and every
//! product lookup goes through the rate limiter first.

use super::http::TinyHttpSource;
use super::rate_limit::RateLimiter;
use super::retry::{Fetch, RetryPolicy};
use super::source::{OrderPage, OrderSource};
use crate::config::ProviderConfig;
use crate::domain::{OrderDetail, OrderId, ProductDetail, ProductId, Result};
use std::sync::Arc;

/// High-level provider client used by the sync pipeline
pub struct TinyClient {
    source: Arc<dyn OrderSource>,
    retry: RetryPolicy,
    rate_limiter: RateLimiter,
}

impl TinyClient {
    /// Create a client talking to the Tiny ERP HTTP API
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let source = TinyHttpSource::new(config)?;
        Ok(Self::with_source(
            Arc::new(source),
            RetryPolicy::from_config(&config.retry),
            RateLimiter::from_config(&config.rate_limit),
        ))
    }

    /// Create a client around any [`OrderSource`]
    pub fn with_source(
        source: Arc<dyn OrderSource>,
        retry: RetryPolicy,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            source,
            retry,
            rate_limiter,
        }
    }

    /// Underlying source
    pub fn source(&self) -> &Arc<dyn OrderSource> {
        &self.source
    }

    /// Retry policy in use
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetch one listing page
    pub async fn search_page(&self, page: u32) -> Fetch<OrderPage> {
        let label = format!("search_orders page={page}");
        self.retry
            .run(&label, || self.source.search_orders(page))
            .await
    }

    /// Fetch the detail of one order
    pub async fn order_detail(&self, order_id: &OrderId) -> Fetch<OrderDetail> {
        let label = format!("get_order id={order_id}");
        self.retry
            .run(&label, || self.source.get_order(order_id))
            .await
    }

    /// Fetch one product, waiting for the rate limiter before every attempt
    pub async fn product_detail(&self, product_id: &ProductId) -> Fetch<ProductDetail> {
        let label = format!("get_product id={product_id}");
        self.retry
            .run(&label, || async move {
                self.rate_limiter.wait().await;
                self.source.get_product(product_id).await
            })
            .await
    }

    /// Check that the provider answers the listing endpoint
    ///
    /// # Errors
    ///
    /// Returns the provider error of the last attempt.
    pub async fn health_check(&self) -> Result<OrderPage> {
        match self.search_page(1).await {
            Fetch::Ready(page) => {
                tracing::info!(
                    base_url = self.source.base_url(),
                    total_pages = page.total_pages,
                    "Provider health check passed"
                );
                Ok(page)
            }
            Fetch::Unavailable { last_error, .. } => {
                tracing::error!(
                    base_url = self.source.base_url(),
                    error = %last_error,
                    "Provider health check failed"
                );
                Err(last_error.into())
            }
        }
    }
}
