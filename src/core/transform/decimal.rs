//! Locale decimal normalization

/// Normalize a locale-formatted decimal to a `.` separated one
///
/// When the value contains a comma it is taken as the decimal separator and any dots
/// are treated as thousands separators: `"1.234,56"` becomes `"1234.56"`. Values
/// without a comma are returned trimmed and otherwise unchanged.
///
/// # Examples
///
/// ```
/// use ordersync::core::transform::decimal::normalize_decimal;
///
/// assert_eq!(normalize_decimal("1,23"), "1.23");
/// assert_eq!(normalize_decimal("1.234,56"), "1234.56");
/// assert_eq!(normalize_decimal("10.5"), "10.5");
/// ```
pub fn normalize_decimal(value: &str) -> String {
    let value = value.trim();
    if value.contains(',') {
        value.replace('.', "").replace(',', ".")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1,23", "1.23")]
    #[test_case("0,00", "0.00")]
    #[test_case("1.234,56", "1234.56")]
    #[test_case("12.50", "12.50")]
    #[test_case(" 3,5 ", "3.5")]
    #[test_case("", "")]
    fn test_normalize_decimal(input: &str, expected: &str) {
        assert_eq!(normalize_decimal(input), expected);
    }
}
