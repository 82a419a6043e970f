//! Product category handling
//!
//! The provider sends a hierarchical category path such as `"Clothing >> Shirts"`.
//! Only the first two levels are kept.

/// Separator between category levels
pub const CATEGORY_SEPARATOR: &str = " >> ";

/// Value substituted for an empty category at load time
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Split a category path into `(primary, secondary)`
///
/// The split happens on the first separator only and both parts are trimmed.
/// A missing or blank category yields two empty strings.
///
/// # Examples
///
/// ```
/// use ordersync::core::transform::category::split_category;
///
/// assert_eq!(split_category(Some("A >> B")), ("A".to_string(), "B".to_string()));
/// assert_eq!(split_category(Some("A")), ("A".to_string(), String::new()));
/// assert_eq!(split_category(None), (String::new(), String::new()));
/// ```
pub fn split_category(category: Option<&str>) -> (String, String) {
    let category = match category {
        Some(c) if !c.trim().is_empty() => c,
        _ => return (String::new(), String::new()),
    };

    match category.split_once(CATEGORY_SEPARATOR) {
        Some((primary, secondary)) => (primary.trim().to_string(), secondary.trim().to_string()),
        None => (category.trim().to_string(), String::new()),
    }
}

/// Replace an empty category level with [`UNKNOWN_CATEGORY`]
pub fn category_or_unknown(level: &str) -> &str {
    if level.trim().is_empty() {
        UNKNOWN_CATEGORY
    } else {
        level
    }
}
