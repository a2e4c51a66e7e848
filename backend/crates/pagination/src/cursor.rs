//! "Start after record X" windows.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lenient::parse_positive;
use crate::page::MAX_PAGE_SIZE;

/// Number of records returned when the client omits `limit`.
pub const DEFAULT_CURSOR_LIMIT: u64 = 5;

/// Raw cursor query parameters as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorParams {
    /// Identifier of the last record the client has already seen.
    pub cursor: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<String>,
}

impl CursorParams {
    /// Resolve the raw parameters into a typed window.
    ///
    /// A cursor that does not parse as `C` is ignored, as is an unusable
    /// limit.
    ///
    /// # Examples
    /// ```
    /// use pagination::{CursorParams, CursorWindow};
    ///
    /// let params = CursorParams {
    ///     cursor: Some("42".to_owned()),
    ///     limit: None,
    /// };
    /// let window: CursorWindow<i64> = params.window();
    /// assert_eq!(window.cursor(), Some(&42));
    /// assert_eq!(window.limit(), 5);
    /// ```
    #[must_use]
    pub fn window<C: FromStr>(&self) -> CursorWindow<C> {
        let cursor = self
            .cursor
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<C>().ok());
        let limit = parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_CURSOR_LIMIT);
        CursorWindow::new(cursor, limit)
    }
}

/// Cursor window over a newest-first sequence.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorWindow<C> {
    cursor: Option<C>,
    limit: u64,
}

impl<C> CursorWindow<C> {
    /// Create a window, clamping `limit` into the accepted range.
    #[must_use]
    pub fn new(cursor: Option<C>, limit: u64) -> Self {
        let limit = if limit == 0 {
            DEFAULT_CURSOR_LIMIT
        } else {
            limit.min(MAX_PAGE_SIZE)
        };
        Self { cursor, limit }
    }

    /// Identifier of the record to start after, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Select the window from a sequence that is already in display order.
    ///
    /// Without a cursor the first `limit` records are returned. With a cursor
    /// the record carrying that key is skipped along with everything before
    /// it; an unknown cursor selects nothing.
    ///
    /// # Examples
    /// ```
    /// use pagination::CursorWindow;
    ///
    /// let ids = vec![9_i64, 8, 7, 6, 5, 4, 3];
    /// let window = CursorWindow::new(Some(8_i64), 3);
    /// assert_eq!(window.select(ids, |id| id), vec![7, 6, 5]);
    /// ```
    #[must_use]
    pub fn select<T>(&self, ordered: Vec<T>, key: impl Fn(&T) -> &C) -> Vec<T>
    where
        C: PartialEq,
    {
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let Some(cursor) = self.cursor.as_ref() else {
            return ordered.into_iter().take(take).collect();
        };

        match ordered.iter().position(|item| key(item) == cursor) {
            Some(position) => ordered
                .into_iter()
                .skip(position.saturating_add(1))
                .take(take)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl<C> Default for CursorWindow<C> {
    fn default() -> Self {
        Self::new(None, DEFAULT_CURSOR_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn newest_first() -> Vec<i64> {
        (1..=20).rev().collect()
    }

    #[rstest]
    fn no_cursor_returns_leading_records() {
        let window = CursorWindow::<i64>::default();
        assert_eq!(window.select(newest_first(), |id| id), vec![20, 19, 18, 17, 16]);
    }

    #[rstest]
    fn cursor_record_itself_is_excluded() {
        let window = CursorWindow::new(Some(15_i64), 5);
        assert_eq!(window.select(newest_first(), |id| id), vec![14, 13, 12, 11, 10]);
    }

    #[rstest]
    fn cursor_near_the_tail_returns_remaining_records() {
        let window = CursorWindow::new(Some(3_i64), 5);
        assert_eq!(window.select(newest_first(), |id| id), vec![2, 1]);
    }

    #[rstest]
    fn unknown_cursor_selects_nothing() {
        let window = CursorWindow::new(Some(99_i64), 5);
        assert!(window.select(newest_first(), |id| id).is_empty());
    }

    #[rstest]
    #[case(Some("abc"), Some("3"), None, 3)]
    #[case(Some("12"), Some("zero"), Some(12), DEFAULT_CURSOR_LIMIT)]
    #[case(None, Some("0"), None, DEFAULT_CURSOR_LIMIT)]
    #[case(Some(" 4 "), Some("500"), Some(4), MAX_PAGE_SIZE)]
    fn params_parse_leniently(
        #[case] cursor: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_cursor: Option<i64>,
        #[case] expected_limit: u64,
    ) {
        let params = CursorParams {
            cursor: cursor.map(str::to_owned),
            limit: limit.map(str::to_owned),
        };
        let window: CursorWindow<i64> = params.window();
        assert_eq!(window.cursor().copied(), expected_cursor);
        assert_eq!(window.limit(), expected_limit);
    }
}
