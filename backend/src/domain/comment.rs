//! Comments attached to articles and products.
//!
//! Article comments and product comments share one shape and differ only in
//! their owner. [`CommentParent`] carries the owner of a single comment;
//! [`CommentKind`] selects the family when only a comment id is known.

use chrono::{DateTime, Utc};
use pagination::CursorWindow;
use serde::{Deserialize, Serialize};

use super::text::RequiredText;
use super::{ArticleId, ProductId};

/// Store-assigned comment identifier, unique within one [`CommentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CommentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Comment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// Comments on bulletin board articles.
    Article,
    /// Comments on marketplace products.
    Product,
}

impl CommentKind {
    /// Lowercase label used in log fields and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Article => "comment",
            Self::Product => "product comment",
        }
    }
}

/// Owner of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentParent {
    /// The comment belongs to an article.
    Article(ArticleId),
    /// The comment belongs to a product.
    Product(ProductId),
}

impl CommentParent {
    /// Family of comments this owner holds.
    #[must_use]
    pub const fn kind(self) -> CommentKind {
        match self {
            Self::Article(_) => CommentKind::Article,
            Self::Product(_) => CommentKind::Product,
        }
    }
}

impl std::fmt::Display for CommentParent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Article(id) => write!(f, "article {id}"),
            Self::Product(id) => write!(f, "product {id}"),
        }
    }
}

/// Which comments a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentScope {
    /// Every comment of one family.
    All(CommentKind),
    /// Comments of a single owner.
    Parent(CommentParent),
}

impl CommentScope {
    /// Family of comments covered by the scope.
    #[must_use]
    pub const fn kind(self) -> CommentKind {
        match self {
            Self::All(kind) => kind,
            Self::Parent(parent) => parent.kind(),
        }
    }
}

/// Cursor listing request for comments, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentListRequest {
    /// Comments to consider.
    pub scope: CommentScope,
    /// Cursor and limit.
    pub window: CursorWindow<CommentId>,
}

impl CommentListRequest {
    /// Page size in the store's integer type.
    #[must_use]
    pub fn limit(&self) -> i64 {
        // Cursor windows clamp the limit to `MAX_PAGE_SIZE`.
        i64::try_from(self.window.limit()).unwrap_or(i64::MAX)
    }
}

/// Validation errors raised while building comment drafts and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// `content` was blank.
    #[error("content must not be empty")]
    EmptyContent,
}

impl CommentValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyContent => "content",
        }
    }
}

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Store-assigned identifier.
    pub id: CommentId,
    /// Owning article or product.
    pub parent: CommentParent,
    /// Comment text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Apply a partial update. The owner never changes.
    #[must_use]
    pub fn merge(self, patch: CommentPatch) -> Self {
        Self {
            content: patch.content.map_or(self.content, RequiredText::into_inner),
            ..self
        }
    }
}

/// Validated input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    content: RequiredText,
}

impl CommentDraft {
    /// Validate the comment text.
    pub fn new(content: impl Into<String>) -> Result<Self, CommentValidationError> {
        RequiredText::new(content)
            .map(|content| Self { content })
            .map_err(|_| CommentValidationError::EmptyContent)
    }

    /// Comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Validated partial update for a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPatch {
    content: Option<RequiredText>,
}

impl CommentPatch {
    /// Validate the fields present in a partial update.
    pub fn new(content: Option<String>) -> Result<Self, CommentValidationError> {
        let content = content
            .map(RequiredText::new)
            .transpose()
            .map_err(|_| CommentValidationError::EmptyContent)?;
        Ok(Self { content })
    }
}
