//! PostgreSQL-backed `ArticleRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{ArticleRepository, PersistenceError};
use crate::domain::{Article, ArticleDraft, ArticleId, ArticleListQuery, ArticleOrder, ArticlePatch};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::DbPool;
use super::schema::articles;
use super::search::contains_pattern;

/// Diesel implementation of the article port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewArticleRow {
            title: draft.title(),
            content: draft.content(),
        };

        diesel::insert_into(articles::table)
            .values(&row)
            .returning(ArticleRow::as_returning())
            .get_result::<ArticleRow>(&mut conn)
            .await
            .map(Article::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        articles::table
            .find(id.get())
            .select(ArticleRow::as_select())
            .first::<ArticleRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Article::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self, query: &ArticleListQuery) -> Result<Vec<Article>, PersistenceError> {
        let bounds = query.bounds()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut base = articles::table.select(ArticleRow::as_select()).into_boxed();
        if let Some(keyword) = query.keyword.as_deref() {
            // Title or content contains the keyword.
            let pattern = contains_pattern(keyword);
            base = base.filter(
                articles::title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(articles::content.like(pattern).escape('\\')),
            );
        }
        let ordered = match query.order {
            ArticleOrder::Recent => base.order((articles::created_at.desc(), articles::id.desc())),
            ArticleOrder::Oldest => base.order((articles::created_at.asc(), articles::id.asc())),
        };

        let rows: Vec<ArticleRow> = ordered
            .offset(bounds.offset())
            .limit(bounds.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn update(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let current = articles::table
                        .find(id.get())
                        .select(ArticleRow::as_select())
                        .for_update()
                        .first::<ArticleRow>(conn)
                        .await
                        .optional()?;
                    let Some(current) = current else {
                        return Ok(None);
                    };

                    let merged = Article::from(current).merge(patch.clone());
                    let changes = ArticleUpdate {
                        title: &merged.title,
                        content: &merged.content,
                    };
                    diesel::update(articles::table.find(id.get()))
                        .set(&changes)
                        .returning(ArticleRow::as_returning())
                        .get_result::<ArticleRow>(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(updated.map(Article::from))
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(articles::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
