//! `LIKE` pattern construction for keyword filters.

/// Wrap `keyword` in `%` after escaping the `LIKE` metacharacters, so the
/// match is a literal, case-sensitive substring test. Use with
/// `.escape('\\')`.
pub(super) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len().saturating_add(2));
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
