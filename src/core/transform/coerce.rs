//! Load-time type coercion
//!
//! Rows are buffered as text during extraction and converted here, once, against the
//! fixed destination schemas. A value that cannot be typed is loaded as NULL and
//! reported back as a [`CellDefault`]; only a row that does not fit its schema fails
//! the load.

use super::category::category_or_unknown;
use crate::domain::{ItemRow, OrderRow, Result, SyncError};
use chrono::{DateTime, NaiveDate, Utc};

/// Destination column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Timestamp,
    Date,
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// PostgreSQL type name
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Timestamp => "TIMESTAMPTZ",
            ColumnKind::Date => "DATE",
            ColumnKind::Integer => "BIGINT",
            ColumnKind::Float => "DOUBLE PRECISION",
            ColumnKind::Text => "TEXT",
        }
    }
}

/// One column of a destination table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn column(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

const ORDER_COLUMNS: [ColumnSpec; 9] = [
    column("timestamp", ColumnKind::Timestamp),
    column("order_date", ColumnKind::Date),
    column("order_id", ColumnKind::Text),
    column("sequence_number", ColumnKind::Integer),
    column("seller_id", ColumnKind::Text),
    column("total_products_amount", ColumnKind::Float),
    column("total_sale_amount", ColumnKind::Float),
    column("discount", ColumnKind::Float),
    column("payment_method", ColumnKind::Text),
];

const ITEM_COLUMNS: [ColumnSpec; 13] = [
    column("timestamp", ColumnKind::Timestamp),
    column("order_date", ColumnKind::Date),
    column("order_id", ColumnKind::Text),
    column("sequence_number", ColumnKind::Integer),
    column("seller_id", ColumnKind::Text),
    column("product_id", ColumnKind::Text),
    column("description", ColumnKind::Text),
    column("quantity", ColumnKind::Float),
    column("discount", ColumnKind::Float),
    column("unit_price", ColumnKind::Float),
    column("cost_price", ColumnKind::Float),
    column("category_primary", ColumnKind::Text),
    column("category_secondary", ColumnKind::Text),
];

/// Name and columns of a destination table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Schema of the orders table
    pub fn orders(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: ORDER_COLUMNS.to_vec(),
        }
    }

    /// Schema of the order-items table
    pub fn items(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: ITEM_COLUMNS.to_vec(),
        }
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

/// A typed cell ready for load
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A typed row, cells in schema column order
pub type TypedRow = Vec<CellValue>;

/// A value that could not be typed and was loaded as NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDefault {
    /// Index of the row in the coerced batch
    pub row: usize,
    pub table: String,
    pub column: &'static str,
    pub message: String,
}

impl CellDefault {
    /// `table.column: message`, as recorded for operators
    pub fn describe(&self) -> String {
        format!("{}.{}: {}", self.table, self.column, self.message)
    }
}

/// Typed rows plus every cell that fell back to NULL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coerced {
    pub rows: Vec<TypedRow>,
    pub defaults: Vec<CellDefault>,
}

/// Normalize a provider order date to ISO `YYYY-MM-DD`
///
/// Dates already in ISO form and unrecognized values are returned unchanged, leaving
/// the final verdict to [`coerce_orders`] / [`coerce_items`].
pub fn normalize_order_date(raw: &str) -> String {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Coerce buffered order rows against `schema`
///
/// # Errors
///
/// Returns `SyncError::Coercion` if a row does not match the schema's column count.
pub fn coerce_orders(schema: &TableSchema, rows: &[OrderRow]) -> Result<Coerced> {
    let mut coerced = Coerced::default();
    for (index, row) in rows.iter().enumerate() {
        let values = [
            row.context.timestamp.as_str(),
            row.context.order_date.as_str(),
            row.context.order_id.as_str(),
            row.context.sequence_number.as_str(),
            row.context.seller_id.as_str(),
            row.total_products_amount.as_str(),
            row.total_sale_amount.as_str(),
            row.discount.as_str(),
            row.payment_method.as_str(),
        ];
        coerce_row(schema, index, &values, &mut coerced)?;
    }
    Ok(coerced)
}

/// Coerce buffered item rows against `schema`
///
/// Empty category levels are replaced with `"Unknown"` here.
///
/// # Errors
///
/// Returns `SyncError::Coercion` if a row does not match the schema's column count.
pub fn coerce_items(schema: &TableSchema, rows: &[ItemRow]) -> Result<Coerced> {
    let mut coerced = Coerced::default();
    for (index, row) in rows.iter().enumerate() {
        let values = [
            row.context.timestamp.as_str(),
            row.context.order_date.as_str(),
            row.context.order_id.as_str(),
            row.context.sequence_number.as_str(),
            row.context.seller_id.as_str(),
            row.product_id.as_str(),
            row.description.as_str(),
            row.quantity.as_str(),
            row.discount.as_str(),
            row.unit_price.as_str(),
            row.cost_price.as_str(),
            category_or_unknown(&row.category_primary),
            category_or_unknown(&row.category_secondary),
        ];
        coerce_row(schema, index, &values, &mut coerced)?;
    }
    Ok(coerced)
}

fn coerce_row(
    schema: &TableSchema,
    index: usize,
    values: &[&str],
    coerced: &mut Coerced,
) -> Result<()> {
    if values.len() != schema.columns.len() {
        return Err(SyncError::Coercion {
            table: schema.name.clone(),
            column: "*".to_string(),
            message: format!(
                "expected {} columns, row has {}",
                schema.columns.len(),
                values.len()
            ),
        });
    }

    let mut cells = Vec::with_capacity(values.len());
    for (column, raw) in schema.columns.iter().zip(values) {
        match coerce_value(column.kind, raw) {
            Ok(cell) => cells.push(cell),
            Err(message) => {
                tracing::warn!(
                    table = %schema.name,
                    column = column.name,
                    row = index,
                    error = %message,
                    "Loading untypeable value as NULL"
                );
                coerced.defaults.push(CellDefault {
                    row: index,
                    table: schema.name.clone(),
                    column: column.name,
                    message,
                });
                cells.push(CellValue::Null);
            }
        }
    }
    coerced.rows.push(cells);
    Ok(())
}

/// Convert one raw value to `kind`
///
/// Blank values become `Null` for every kind except text.
pub fn coerce_value(kind: ColumnKind, raw: &str) -> std::result::Result<CellValue, String> {
    let trimmed = raw.trim();

    if kind == ColumnKind::Text {
        return Ok(CellValue::Text(raw.to_string()));
    }
    if trimmed.is_empty() {
        return Ok(CellValue::Null);
    }

    match kind {
        ColumnKind::Timestamp => DateTime::parse_from_rfc3339(trimmed)
            .map(|ts| CellValue::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|e| format!("invalid timestamp '{trimmed}': {e}")),
        ColumnKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
            .map(CellValue::Date)
            .map_err(|e| format!("invalid date '{trimmed}': {e}")),
        ColumnKind::Integer => trimmed
            .parse::<i64>()
            .map(CellValue::Integer)
            .map_err(|e| format!("invalid integer '{trimmed}': {e}")),
        ColumnKind::Float => match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(CellValue::Float(v)),
            Ok(_) => Err(format!("non-finite number '{trimmed}'")),
            Err(e) => Err(format!("invalid number '{trimmed}': {e}")),
        },
        ColumnKind::Text => Ok(CellValue::Text(raw.to_string())),
    }
}
