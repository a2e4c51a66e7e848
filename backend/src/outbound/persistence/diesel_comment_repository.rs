//! PostgreSQL-backed `CommentRepository`.
//!
//! Article and product comments live in separate tables with identical
//! shapes apart from the owner column. `comment_table_queries!` generates
//! one query module per table; the port implementation only dispatches on
//! [`CommentKind`].

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{CommentRepository, PersistenceError};
use crate::domain::{
    Comment, CommentDraft, CommentId, CommentKind, CommentListRequest, CommentParent,
    CommentPatch, CommentScope,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// Generate the queries for one comment table.
///
/// Every generated function works on an already checked-out connection and
/// returns raw Diesel results; error mapping stays with the caller.
macro_rules! comment_table_queries {
    (
        mod $module:ident {
            table: $table:ident,
            parent: $parent:ident,
            row: $row:ident,
            new_row: $new_row:ident $(,)?
        }
    ) => {
        mod $module {
            use chrono::{DateTime, Utc};
            use diesel::prelude::*;
            use diesel::result::Error as DieselError;
            use diesel_async::scoped_futures::ScopedFutureExt as _;
            use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

            use crate::domain::{Comment, CommentPatch};

            use super::super::models::{$new_row, $row};
            use super::super::schema::$table;

            pub(super) async fn insert(
                conn: &mut AsyncPgConnection,
                parent_id: i64,
                content: &str,
            ) -> Result<Comment, DieselError> {
                let row = $new_row {
                    $parent: parent_id,
                    content,
                };
                diesel::insert_into($table::table)
                    .values(&row)
                    .returning($row::as_returning())
                    .get_result::<$row>(conn)
                    .await
                    .map(Comment::from)
            }

            /// Newest first, strictly after `cursor` when given. `None` when
            /// the cursor row is not within the listed owner's comments.
            pub(super) async fn list(
                conn: &mut AsyncPgConnection,
                parent_id: Option<i64>,
                cursor: Option<i64>,
                limit: i64,
            ) -> Result<Option<Vec<Comment>>, DieselError> {
                let mut query = $table::table
                    .select($row::as_select())
                    .order(($table::created_at.desc(), $table::id.desc()))
                    .into_boxed();
                if let Some(parent_id) = parent_id {
                    query = query.filter($table::$parent.eq(parent_id));
                }

                if let Some(cursor) = cursor {
                    let mut anchor_query = $table::table
                        .filter($table::id.eq(cursor))
                        .select($table::created_at)
                        .into_boxed();
                    if let Some(parent_id) = parent_id {
                        anchor_query = anchor_query.filter($table::$parent.eq(parent_id));
                    }
                    let anchor: Option<DateTime<Utc>> =
                        anchor_query.first(conn).await.optional()?;
                    let Some(anchor) = anchor else {
                        return Ok(None);
                    };
                    query = query.filter(
                        $table::created_at
                            .lt(anchor)
                            .or($table::created_at.eq(anchor).and($table::id.lt(cursor))),
                    );
                }

                let rows: Vec<$row> = query.limit(limit).load(conn).await?;
                Ok(Some(rows.into_iter().map(Comment::from).collect()))
            }

            pub(super) async fn update(
                conn: &mut AsyncPgConnection,
                id: i64,
                patch: &CommentPatch,
            ) -> Result<Option<Comment>, DieselError> {
                conn.transaction::<_, diesel::result::Error, _>(|conn| {
                    async move {
                        let current = $table::table
                            .find(id)
                            .select($row::as_select())
                            .for_update()
                            .first::<$row>(conn)
                            .await
                            .optional()?;
                        let Some(current) = current else {
                            return Ok(None);
                        };

                        let merged = Comment::from(current).merge(patch.clone());
                        diesel::update($table::table.find(id))
                            .set($table::content.eq(&merged.content))
                            .returning($row::as_returning())
                            .get_result::<$row>(conn)
                            .await
                            .map(|row| Some(Comment::from(row)))
                    }
                    .scope_boxed()
                })
                .await
            }

            pub(super) async fn delete(
                conn: &mut AsyncPgConnection,
                id: i64,
            ) -> Result<bool, DieselError> {
                diesel::delete($table::table.find(id))
                    .execute(conn)
                    .await
                    .map(|deleted| deleted > 0)
            }
        }
    };
}

comment_table_queries! {
    mod article_comment_queries {
        table: article_comments,
        parent: article_id,
        row: ArticleCommentRow,
        new_row: NewArticleCommentRow,
    }
}

comment_table_queries! {
    mod product_comment_queries {
        table: product_comments,
        parent: product_id,
        row: ProductCommentRow,
        new_row: NewProductCommentRow,
    }
}

/// Diesel implementation of the comment port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// A foreign key violation on insert means the owner row is gone.
fn map_insert_error(error: DieselError, parent: CommentParent) -> PersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            PersistenceError::missing_parent(parent.to_string())
        }
        other => map_diesel_error(other),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(
        &self,
        parent: CommentParent,
        draft: &CommentDraft,
    ) -> Result<Comment, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let created = match parent {
            CommentParent::Article(id) => {
                article_comment_queries::insert(&mut conn, id.get(), draft.content()).await
            }
            CommentParent::Product(id) => {
                product_comment_queries::insert(&mut conn, id.get(), draft.content()).await
            }
        };
        created.map_err(|err| map_insert_error(err, parent))
    }

    async fn list(&self, request: &CommentListRequest) -> Result<Vec<Comment>, PersistenceError> {
        let limit = request.limit();
        let cursor = request.window.cursor().map(|id| id.get());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let listed = match request.scope {
            CommentScope::All(CommentKind::Article) => {
                article_comment_queries::list(&mut conn, None, cursor, limit).await
            }
            CommentScope::All(CommentKind::Product) => {
                product_comment_queries::list(&mut conn, None, cursor, limit).await
            }
            CommentScope::Parent(CommentParent::Article(id)) => {
                article_comment_queries::list(&mut conn, Some(id.get()), cursor, limit).await
            }
            CommentScope::Parent(CommentParent::Product(id)) => {
                product_comment_queries::list(&mut conn, Some(id.get()), cursor, limit).await
            }
        };

        listed
            .map(Option::unwrap_or_default)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        kind: CommentKind,
        id: CommentId,
        patch: &CommentPatch,
    ) -> Result<Option<Comment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = match kind {
            CommentKind::Article => article_comment_queries::update(&mut conn, id.get(), patch).await,
            CommentKind::Product => product_comment_queries::update(&mut conn, id.get(), patch).await,
        };
        updated.map_err(map_diesel_error)
    }

    async fn delete(&self, kind: CommentKind, id: CommentId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = match kind {
            CommentKind::Article => article_comment_queries::delete(&mut conn, id.get()).await,
            CommentKind::Product => product_comment_queries::delete(&mut conn, id.get()).await,
        };
        deleted.map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleId, ErrorCode, ProductId};
    use rstest::rstest;

    #[rstest]
    #[case(CommentParent::Article(ArticleId::new(4)), "article 4 not found")]
    #[case(CommentParent::Product(ProductId::new(9)), "product 9 not found")]
    fn insert_foreign_key_violation_is_missing_parent(
        #[case] parent: CommentParent,
        #[case] message: &str,
    ) {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(String::from("insert violates foreign key constraint")),
        );
        let mapped = map_insert_error(error, parent);
        assert_eq!(mapped.code(), ErrorCode::NotFound);
        assert_eq!(mapped.to_string(), message);
    }

    #[rstest]
    fn other_insert_failures_are_internal() {
        let mapped = map_insert_error(DieselError::NotFound, CommentParent::Article(ArticleId::new(1)));
        assert_eq!(mapped.code(), ErrorCode::InternalError);
    }
}
