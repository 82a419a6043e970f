//! Tiny ERP API v2 wire models (`formato=json`)
//!
//! Every endpoint answers with a `{"retorno": {...}}` envelope carrying a `status`
//! of `OK` or `Erro`. Numeric fields arrive as JSON numbers or strings depending on
//! the endpoint, so they are read as text and left for the load-time coercion pass.

use crate::domain::{
    OrderDetail, OrderId, OrderItem, OrderSummary, ProductDetail, ProductId, ProviderError,
    SequenceNumber,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Error code the provider uses for "the query returned no records"
pub const NO_RECORDS_CODE: u32 = 20;

/// Top-level response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub retorno: Retorno<T>,
}

/// Status fields shared by every response, plus the endpoint-specific body
#[derive(Debug, Deserialize)]
pub struct Retorno<T> {
    #[serde(default, deserialize_with = "text")]
    pub status: String,

    #[serde(default, deserialize_with = "opt_u32")]
    pub codigo_erro: Option<u32>,

    #[serde(default)]
    pub erros: Vec<ErrorEntry>,

    #[serde(flatten)]
    pub body: T,
}

impl<T> Retorno<T> {
    /// Returns the body when the provider reported success
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Api` carrying the provider's error code and messages.
    pub fn into_body(self) -> Result<T, ProviderError> {
        if self.status.eq_ignore_ascii_case("OK") {
            return Ok(self.body);
        }

        let message = self
            .erros
            .iter()
            .map(|e| e.erro.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ProviderError::Api {
            code: self.codigo_erro,
            message: if message.is_empty() {
                format!("status '{}'", self.status)
            } else {
                message
            },
        })
    }
}

/// One entry of `retorno.erros`
#[derive(Debug, Deserialize)]
pub struct ErrorEntry {
    #[serde(default, deserialize_with = "text")]
    pub erro: String,
}

/// Body of `pedidos.pesquisa.php`
#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    #[serde(default, deserialize_with = "opt_u32")]
    pub pagina: Option<u32>,

    #[serde(default, deserialize_with = "opt_u32")]
    pub numero_paginas: Option<u32>,

    #[serde(default)]
    pub pedidos: Vec<SearchEntry>,
}

/// `{"pedido": {...}}` wrapper inside the search result
#[derive(Debug, Deserialize)]
pub struct SearchEntry {
    pub pedido: WireOrderSummary,
}

/// Order summary as listed by the search endpoint
#[derive(Debug, Deserialize)]
pub struct WireOrderSummary {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub numero: String,

    #[serde(default, deserialize_with = "text")]
    pub data_pedido: String,

    #[serde(default, deserialize_with = "opt_text")]
    pub id_vendedor: Option<String>,
}

impl TryFrom<WireOrderSummary> for OrderSummary {
    type Error = ProviderError;

    fn try_from(wire: WireOrderSummary) -> Result<Self, Self::Error> {
        let sequence_number =
            SequenceNumber::from_str(&wire.numero).map_err(ProviderError::InvalidResponse)?;
        let order_id = OrderId::new(wire.id).map_err(ProviderError::InvalidResponse)?;

        Ok(OrderSummary {
            sequence_number,
            order_id,
            order_date: wire.data_pedido,
            seller_id: wire.id_vendedor.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Body of `pdv.pedido.obter.php`
#[derive(Debug, Default, Deserialize)]
pub struct OrderDetailBody {
    #[serde(default)]
    pub pedido: Option<WireOrderDetail>,
}

/// Full order payload
#[derive(Debug, Deserialize)]
pub struct WireOrderDetail {
    #[serde(rename = "totalProdutos", default, deserialize_with = "text")]
    pub total_produtos: String,

    #[serde(rename = "totalVenda", default, deserialize_with = "text")]
    pub total_venda: String,

    #[serde(default, deserialize_with = "text")]
    pub desconto: String,

    #[serde(rename = "formaPagamento", default, deserialize_with = "text")]
    pub forma_pagamento: String,

    #[serde(default)]
    pub itens: Vec<WireItemEntry>,
}

/// Items arrive either flat or wrapped in `{"item": {...}}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireItemEntry {
    Wrapped { item: WireOrderItem },
    Flat(WireOrderItem),
}

impl WireItemEntry {
    fn into_item(self) -> WireOrderItem {
        match self {
            WireItemEntry::Wrapped { item } | WireItemEntry::Flat(item) => item,
        }
    }
}

/// Line item of an order
#[derive(Debug, Deserialize)]
pub struct WireOrderItem {
    #[serde(rename = "idProduto", alias = "id_produto", default, deserialize_with = "text")]
    pub id_produto: String,

    #[serde(default, deserialize_with = "text")]
    pub descricao: String,

    #[serde(default, deserialize_with = "text")]
    pub quantidade: String,

    #[serde(default, deserialize_with = "text")]
    pub desconto: String,

    #[serde(alias = "valor_unitario", default, deserialize_with = "text")]
    pub valor: String,
}

impl From<WireOrderDetail> for OrderDetail {
    fn from(wire: WireOrderDetail) -> Self {
        let mut items = Vec::with_capacity(wire.itens.len());
        for entry in wire.itens {
            let item = entry.into_item();
            match ProductId::new(item.id_produto) {
                Ok(product_id) => items.push(OrderItem {
                    product_id,
                    description: item.descricao,
                    quantity: item.quantidade,
                    discount: item.desconto,
                    unit_price: item.valor,
                }),
                Err(e) => {
                    tracing::warn!(
                        description = %item.descricao,
                        error = %e,
                        "Dropping order item without product id"
                    );
                }
            }
        }

        OrderDetail {
            total_products_amount: wire.total_produtos,
            total_sale_amount: wire.total_venda,
            discount: wire.desconto,
            payment_method: wire.forma_pagamento,
            items,
        }
    }
}

/// Body of `produto.obter.php`
#[derive(Debug, Default, Deserialize)]
pub struct ProductBody {
    #[serde(default)]
    pub produto: Option<WireProduct>,
}

/// Product metadata
#[derive(Debug, Deserialize)]
pub struct WireProduct {
    #[serde(default, deserialize_with = "text")]
    pub preco_custo: String,

    #[serde(default, deserialize_with = "opt_text")]
    pub categoria: Option<String>,
}

impl From<WireProduct> for ProductDetail {
    fn from(wire: WireProduct) -> Self {
        ProductDetail {
            cost_price: wire.preco_custo,
            category: wire.categoria,
        }
    }
}

/// Reads a string, number or bool as text; null becomes `None`
fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match opt_text(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
