//! Data transformation logic
//!
//! Field-level clean-up applied during extraction (category split, decimal and date
//! normalization) and the single load-time coercion pass into typed rows.

pub mod category;
pub mod coerce;
pub mod decimal;

pub use category::{category_or_unknown, split_category, UNKNOWN_CATEGORY};
pub use coerce::{
    coerce_items, coerce_orders, normalize_order_date, CellDefault, CellValue, Coerced,
    ColumnKind, ColumnSpec, TableSchema, TypedRow,
};
pub use decimal::normalize_decimal;
