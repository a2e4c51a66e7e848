//! Port for article persistence.

use async_trait::async_trait;

use crate::domain::{Article, ArticleDraft, ArticleId, ArticleListQuery, ArticlePatch};

use super::PersistenceError;

/// Storage operations backing the `/article` routes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article and return it with its assigned id and timestamp.
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, PersistenceError>;

    /// Fetch one article.
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, PersistenceError>;

    /// Fetch the window of articles matching `query`, in its order.
    async fn list(&self, query: &ArticleListQuery) -> Result<Vec<Article>, PersistenceError>;

    /// Merge `patch` into the stored article. `None` when the id is unknown.
    async fn update(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, PersistenceError>;

    /// Remove the article and its comments. `false` when the id is unknown.
    async fn delete(&self, id: ArticleId) -> Result<bool, PersistenceError>;
}
