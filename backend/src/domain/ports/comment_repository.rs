//! Port for article and product comment persistence.

use async_trait::async_trait;

use crate::domain::{
    Comment, CommentDraft, CommentId, CommentKind, CommentListRequest, CommentParent,
    CommentPatch,
};

use super::PersistenceError;

/// Storage operations for both comment families.
///
/// Adapters report a missing owner on [`CommentRepository::create`] as
/// [`PersistenceError::MissingParent`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Attach a new comment to `parent`.
    async fn create(
        &self,
        parent: CommentParent,
        draft: &CommentDraft,
    ) -> Result<Comment, PersistenceError>;

    /// Cursor listing, newest first.
    async fn list(&self, request: &CommentListRequest) -> Result<Vec<Comment>, PersistenceError>;

    /// Merge `patch` into the stored comment. `None` when the id is unknown.
    async fn update(
        &self,
        kind: CommentKind,
        id: CommentId,
        patch: &CommentPatch,
    ) -> Result<Option<Comment>, PersistenceError>;

    /// Remove one comment. `false` when the id is unknown.
    async fn delete(&self, kind: CommentKind, id: CommentId) -> Result<bool, PersistenceError>;
}
