//! Page and cursor window primitives shared by listing endpoints.
//!
//! Listing endpoints receive loosely typed query strings. The types here turn
//! those strings into bounded windows without ever failing: values that do
//! not parse, or that fall outside the accepted range, are replaced by the
//! documented defaults.
//!
//! Two modes are supported:
//!
//! - [`PageWindow`]: a numeric `offset`/`limit` window, derived either from a
//!   1-based `page` and `pageSize` or from an explicit `offset` and `limit`.
//! - [`CursorWindow`]: "start after record X" pagination over an ordered
//!   sequence, keyed by a record identifier.
//!
//! # Examples
//!
//! ```
//! use pagination::PageParams;
//!
//! let params = PageParams {
//!     page: Some("2".to_owned()),
//!     page_size: Some("5".to_owned()),
//!     ..PageParams::default()
//! };
//! let window = params.window();
//! assert_eq!(window.offset(), 5);
//! assert_eq!(window.limit(), 5);
//! ```

mod cursor;
mod lenient;
mod page;

pub use cursor::{CursorParams, CursorWindow, DEFAULT_CURSOR_LIMIT};
pub use lenient::{parse_non_negative, parse_positive};
pub use page::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageParams, PageWindow};
