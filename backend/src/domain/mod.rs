//! Domain entities, query shaping, errors, and ports.
//!
//! Types here know nothing about HTTP or SQL. Validation happens in the
//! `*Draft` and `*Patch` constructors; once built, a draft or patch is always
//! valid.

pub mod article;
pub mod comment;
pub mod error;
pub mod listing;
pub mod ports;
pub mod product;
mod text;
pub mod trace_id;

pub use self::article::{Article, ArticleDraft, ArticleId, ArticlePatch, ArticleValidationError};
pub use self::comment::{
    Comment, CommentDraft, CommentId, CommentKind, CommentListRequest, CommentParent,
    CommentPatch, CommentScope, CommentValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    ArticleListQuery, ArticleOrder, Keyword, ListQuery, ProductListQuery, ProductOrder,
    ProductPage, WindowBounds,
};
pub use self::product::{Product, ProductDraft, ProductId, ProductPatch, ProductValidationError};
pub use self::trace_id::TraceId;

/// Result type returned by every HTTP handler.
///
/// # Examples
/// ```
/// use market_board::domain::{ApiResult, Error};
///
/// fn lookup(found: bool) -> ApiResult<&'static str> {
///     if found { Ok("article") } else { Err(Error::not_found("article 1 not found")) }
/// }
/// assert!(lookup(false).is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
