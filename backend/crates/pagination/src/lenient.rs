//! Lenient numeric parsing for query-string values.

/// Parse a raw query value as a strictly positive integer.
///
/// Returns `None` for absent, blank, non-numeric, negative, or zero input so
/// callers can substitute their default.
///
/// # Examples
/// ```
/// use pagination::parse_positive;
///
/// assert_eq!(parse_positive(Some("3")), Some(3));
/// assert_eq!(parse_positive(Some("0")), None);
/// assert_eq!(parse_positive(Some("three")), None);
/// ```
#[must_use]
pub fn parse_positive(raw: Option<&str>) -> Option<u64> {
    parse_non_negative(raw).filter(|value| *value > 0)
}

/// Parse a raw query value as a non-negative integer.
///
/// # Examples
/// ```
/// use pagination::parse_non_negative;
///
/// assert_eq!(parse_non_negative(Some(" 0 ")), Some(0));
/// assert_eq!(parse_non_negative(Some("-1")), None);
/// ```
#[must_use]
pub fn parse_non_negative(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<u64>().ok())
}
