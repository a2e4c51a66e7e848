//! Keyword filtering and ordering for page-mode listings.
//!
//! Every adapter must produce the same result for the same [`ListQuery`];
//! the comparators here are the reference ordering and the in-memory adapter
//! uses them directly.

use std::cmp::Ordering;

use pagination::PageWindow;

use super::ports::PersistenceError;
use super::{Article, Product};

/// Case-sensitive substring filter.
///
/// An empty keyword matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyword(Option<String>);

impl Keyword {
    /// Build a keyword from the raw query value.
    #[must_use]
    pub fn new(raw: Option<String>) -> Self {
        Self(raw.filter(|value| !value.is_empty()))
    }

    /// Keyword text, or `None` when everything matches.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether any of `fields` contains the keyword.
    ///
    /// # Examples
    /// ```
    /// use market_board::domain::Keyword;
    ///
    /// let keyword = Keyword::new(Some("Bike".to_owned()));
    /// assert!(keyword.matches_any(&["Road Bike", "red"]));
    /// assert!(!keyword.matches_any(&["road bike"]));
    /// assert!(Keyword::default().matches_any(&[]));
    /// ```
    #[must_use]
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.0
            .as_deref()
            .is_none_or(|needle| fields.iter().any(|field| field.contains(needle)))
    }
}

/// Sort order for article listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleOrder {
    /// Newest first.
    #[default]
    Recent,
    /// Oldest first.
    Oldest,
}

impl ArticleOrder {
    /// Parse an order keyword; anything unrecognised means [`Self::Recent`].
    #[must_use]
    pub fn from_keyword(raw: Option<&str>) -> Self {
        match raw {
            Some("oldest") => Self::Oldest,
            _ => Self::Recent,
        }
    }

    /// Reference comparator. Ties on `created_at` break on `id` in the same
    /// direction.
    #[must_use]
    pub fn compare(self, a: &Article, b: &Article) -> Ordering {
        let ascending = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
        match self {
            Self::Recent => ascending.reverse(),
            Self::Oldest => ascending,
        }
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    /// Newest first.
    #[default]
    Recent,
    /// Most favourited first, newest first among equals.
    Favorite,
}

impl ProductOrder {
    /// Parse an order keyword; anything unrecognised means [`Self::Recent`].
    #[must_use]
    pub fn from_keyword(raw: Option<&str>) -> Self {
        match raw {
            Some("favorite") => Self::Favorite,
            _ => Self::Recent,
        }
    }

    /// Reference comparator.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        let recent = b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id));
        match self {
            Self::Recent => recent,
            Self::Favorite => b.favorite_count.cmp(&a.favorite_count).then(recent),
        }
    }
}

/// Filter, order, and window of a page-mode listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery<O> {
    /// Text filter.
    pub keyword: Keyword,
    /// Sort order.
    pub order: O,
    /// Records to return.
    pub window: PageWindow,
}

impl<O> ListQuery<O> {
    /// The window as signed skip/take bounds.
    ///
    /// Every adapter runs this check before listing so an offset beyond the
    /// store's integer range fails the same way everywhere.
    ///
    /// # Errors
    /// [`PersistenceError::InvalidArgument`] when the offset or limit does not
    /// fit in an `i64`.
    pub fn bounds(&self) -> Result<WindowBounds, PersistenceError> {
        WindowBounds::try_from(self.window)
    }
}

/// Skip/take bounds of a [`PageWindow`] in the range stores accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    offset: i64,
    limit: i64,
}

impl WindowBounds {
    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

impl TryFrom<PageWindow> for WindowBounds {
    type Error = PersistenceError;

    fn try_from(window: PageWindow) -> Result<Self, Self::Error> {
        let bound = |value: u64, name: &str| {
            i64::try_from(value).map_err(|_| {
                PersistenceError::invalid_argument(format!("{name} exceeds the supported range"))
            })
        };
        Ok(Self {
            offset: bound(window.offset(), "offset")?,
            limit: bound(window.limit(), "limit")?,
        })
    }
}

/// Page-mode listing of articles.
pub type ArticleListQuery = ListQuery<ArticleOrder>;
/// Page-mode listing of products.
pub type ProductListQuery = ListQuery<ProductOrder>;

/// One window of products together with the size of the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPage {
    /// Number of products matching the keyword, ignoring the window.
    pub total_count: u64,
    /// Products inside the window.
    pub products: Vec<Product>,
}
