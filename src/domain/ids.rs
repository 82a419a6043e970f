//! Domain identifier types with validation
//!
//! Newtype wrappers for provider identifiers. The sequence number is the sync
//! cursor; order and product ids are opaque keys used only for detail lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-assigned order sequence number
///
/// Monotonic and unique per order. Used as the checkpoint value.
///
/// # Examples
///
/// ```
/// use ordersync::domain::ids::SequenceNumber;
/// use std::str::FromStr;
///
/// let seq = SequenceNumber::from_str(" 1042 ").unwrap();
/// assert_eq!(seq.value(), 1042);
/// assert!(seq > SequenceNumber::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// The cold-start checkpoint
    pub const ZERO: SequenceNumber = SequenceNumber(0);

    /// Creates a new SequenceNumber
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SequenceNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid sequence number '{s}': {e}"))
    }
}

impl From<u64> for SequenceNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Opaque order identifier used for order-detail lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new OrderId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(OrderId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Order ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the order ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque product identifier used for product-detail lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new ProductId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Product ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the product ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_number_parse() {
        assert_eq!(SequenceNumber::from_str("105").unwrap().value(), 105);
        assert_eq!(SequenceNumber::from_str("  7\n").unwrap().value(), 7);
        assert!(SequenceNumber::from_str("").is_err());
        assert!(SequenceNumber::from_str("-1").is_err());
        assert!(SequenceNumber::from_str("12a").is_err());
    }

    #[test]
    fn test_sequence_number_ordering() {
        let a = SequenceNumber::new(100);
        let b = SequenceNumber::new(105);
        assert!(a < b);
        assert_eq!(a.max(b), b);
        assert_eq!(SequenceNumber::default(), SequenceNumber::ZERO);
    }

    #[test]
    fn test_sequence_number_serde_transparent() {
        let json = serde_json::to_string(&SequenceNumber::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_order_id_validation() {
        assert!(OrderId::new("123456").is_ok());
        assert!(OrderId::new("").is_err());
        assert!(OrderId::new("   ").is_err());
    }

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("998877").unwrap();
        assert_eq!(id.to_string(), "998877");
        assert_eq!(id.as_str(), "998877");
    }
}
