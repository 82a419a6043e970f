//! Domain models and types for ordersync.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SequenceNumber`], [`OrderId`], [`ProductId`])
//! - **Order models** ([`OrderSummary`], [`OrderDetail`], [`OrderItem`], [`ProductDetail`])
//! - **Buffered rows** ([`OrderRow`], [`ItemRow`])
//! - **Error types** ([`SyncError`], [`ProviderError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! ```rust
//! use ordersync::domain::{OrderId, ProductId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let order_id = OrderId::new("123456")?;
//! let product_id = ProductId::new("998877")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: OrderId = product_id;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod order;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ProviderError, SyncError};
pub use ids::{OrderId, ProductId, SequenceNumber};
pub use order::{
    ItemRow, OrderDetail, OrderItem, OrderRow, OrderSummary, ProductDetail, RowContext,
};
pub use result::Result;
