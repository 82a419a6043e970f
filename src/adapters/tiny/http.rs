//! Tiny ERP API v2 over HTTP
//!
//! Authentication is a `token` query parameter sent with every request, so request
//! URLs are never logged.

use super::models::{Envelope, OrderDetailBody, ProductBody, SearchBody, NO_RECORDS_CODE};
use super::source::{OrderPage, OrderSource, RejectedEntry};
use crate::config::{ProviderConfig, SecretString};
use crate::domain::{
    OrderDetail, OrderId, OrderSummary, ProductDetail, ProductId, ProviderError, Result,
    SequenceNumber, SyncError,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const SEARCH_ENDPOINT: &str = "pedidos.pesquisa.php";
const ORDER_ENDPOINT: &str = "pdv.pedido.obter.php";
const PRODUCT_ENDPOINT: &str = "produto.obter.php";

/// HTTP implementation of [`OrderSource`] for the Tiny ERP API
pub struct TinyHttpSource {
    base_url: String,
    client: Client,
    token: SecretString,
}

impl TinyHttpSource {
    /// Create a new source from the provider configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token: config.token.clone(),
        })
    }

    fn endpoint_url(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint))
            .map_err(|e| ProviderError::ConnectionFailed(format!("Invalid provider URL: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("token", self.token.expose_secret().as_str())
                .append_pair("formato", "json");
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn get_envelope<T>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint, params)?;

        tracing::debug!(endpoint = endpoint, "Calling provider");

        let response = self.client.get(url).send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(if status.is_server_error() {
                ProviderError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                ProviderError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("{endpoint}: {e}"))
        })?;

        envelope.retorno.into_body()
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    // reqwest includes the full URL (and so the token) in its Display output
    let e = e.without_url();
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl OrderSource for TinyHttpSource {
    async fn search_orders(&self, page: u32) -> std::result::Result<OrderPage, ProviderError> {
        let page_param = page.to_string();
        let params = [("sort", "DESC"), ("pagina", page_param.as_str())];

        let body = match self.get_envelope::<SearchBody>(SEARCH_ENDPOINT, &params).await {
            Ok(body) => body,
            Err(ProviderError::Api {
                code: Some(NO_RECORDS_CODE),
                ..
            }) => {
                tracing::debug!(page = page, "Provider reported no orders");
                return Ok(OrderPage::empty(page));
            }
            Err(e) => return Err(e),
        };

        let mut orders = Vec::with_capacity(body.pedidos.len());
        let mut rejected = Vec::new();
        for entry in body.pedidos {
            let sequence_number = SequenceNumber::from_str(&entry.pedido.numero).ok();
            let order_id = Some(entry.pedido.id.clone()).filter(|id| !id.trim().is_empty());
            match OrderSummary::try_from(entry.pedido) {
                Ok(summary) => orders.push(summary),
                Err(e) => {
                    tracing::warn!(page = page, error = %e, "Malformed order summary in listing");
                    rejected.push(RejectedEntry {
                        sequence_number,
                        order_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(OrderPage {
            page: body.pagina.unwrap_or(page),
            total_pages: body.numero_paginas.unwrap_or(1),
            orders,
            rejected,
        })
    }

    async fn get_order(
        &self,
        order_id: &OrderId,
    ) -> std::result::Result<OrderDetail, ProviderError> {
        let body: OrderDetailBody = self
            .get_envelope(ORDER_ENDPOINT, &[("id", order_id.as_str())])
            .await?;

        body.pedido.map(OrderDetail::from).ok_or_else(|| {
            ProviderError::InvalidResponse(format!("Order {order_id} response has no 'pedido'"))
        })
    }

    async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> std::result::Result<ProductDetail, ProviderError> {
        let body: ProductBody = self
            .get_envelope(PRODUCT_ENDPOINT, &[("id", product_id.as_str())])
            .await?;

        body.produto.map(ProductDetail::from).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "Product {product_id} response has no 'produto'"
            ))
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            base_url: "https://api.example.com/api2/".to_string(),
            token: secret_string("abc123".to_string()),
            tls_verify: true,
            timeout_seconds: 5,
            retry: Default::default(),
            rate_limit: Default::default(),
        }
    }

    #[test]
    fn test_endpoint_url_carries_token_and_format() {
        let source = TinyHttpSource::new(&test_config()).unwrap();
        let url = source
            .endpoint_url(SEARCH_ENDPOINT, &[("pagina", "2")])
            .unwrap();

        assert_eq!(url.path(), "/api2/pedidos.pesquisa.php");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("token".to_string(), "abc123".to_string())));
        assert!(query.contains(&("formato".to_string(), "json".to_string())));
        assert!(query.contains(&("pagina".to_string(), "2".to_string())));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = TinyHttpSource::new(&test_config()).unwrap();
        assert_eq!(source.base_url(), "https://api.example.com/api2");
    }
}
