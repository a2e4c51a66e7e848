//! Numeric page windows.

use serde::{Deserialize, Serialize};

use crate::lenient::{parse_non_negative, parse_positive};

/// Page used when the client omits `page` or sends an unusable value.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the client omits `pageSize`/`limit`.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Raw pagination query parameters as received on the wire.
///
/// Every field is kept as an optional string so that malformed values reach
/// [`PageParams::window`] and fall back to defaults instead of failing
/// extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<String>,
    /// Number of records per page.
    pub page_size: Option<String>,
    /// Explicit number of records to skip.
    pub offset: Option<String>,
    /// Explicit number of records to take.
    pub limit: Option<String>,
}

impl PageParams {
    /// Resolve the parameters into a concrete window.
    ///
    /// When either `offset` or `limit` parses as a number the explicit
    /// offset/limit mode wins; otherwise the window is derived from
    /// `page`/`pageSize`.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let offset = parse_non_negative(self.offset.as_deref());
        let limit = parse_positive(self.limit.as_deref());
        if offset.is_some() || limit.is_some() {
            return PageWindow::from_offset(
                offset.unwrap_or_default(),
                limit.unwrap_or(DEFAULT_PAGE_SIZE),
            );
        }

        PageWindow::from_page(
            parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            parse_positive(self.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// A skip/take window over an ordered, filtered result set.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Build a window from a 1-based page number and a page size.
    ///
    /// A page of `0` is treated as the first page.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageWindow;
    ///
    /// let window = PageWindow::from_page(3, 10);
    /// assert_eq!(window.offset(), 20);
    /// ```
    #[must_use]
    pub fn from_page(page: u64, page_size: u64) -> Self {
        let limit = clamp_limit(page_size);
        let offset = page.max(1).saturating_sub(1).saturating_mul(limit);
        Self { offset, limit }
    }

    /// Build a window from an explicit offset and limit.
    #[must_use]
    pub fn from_offset(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: clamp_limit(limit),
        }
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Apply the window to an already filtered and sorted slice.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageWindow;
    ///
    /// let records: Vec<u32> = (1..=12).collect();
    /// assert_eq!(PageWindow::from_page(2, 5).slice(&records), &[6, 7, 8, 9, 10]);
    /// ```
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(take).min(items.len());
        items.get(start..end).unwrap_or_default()
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::from_page(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

fn clamp_limit(limit: u64) -> u64 {
    if limit == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit.min(MAX_PAGE_SIZE)
    }
}
