//! Diesel row structs. Never exposed outside the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Article, ArticleId, Comment, CommentId, CommentParent, Product, ProductId,
};

use super::schema::{article_comments, articles, product_comments, products};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: ArticleId::new(row.id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Full changeset written after merging a patch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub tags: Vec<String>,
    pub favorite_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            tags: row.tags,
            favorite_count: row.favorite_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub tags: &'a [String],
}

/// Full changeset written after merging a patch. `favorite_count` is not
/// client-writable.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub tags: &'a [String],
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = article_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleCommentRow {
    pub id: i64,
    pub article_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleCommentRow> for Comment {
    fn from(row: ArticleCommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            parent: CommentParent::Article(ArticleId::new(row.article_id)),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = article_comments)]
pub(crate) struct NewArticleCommentRow<'a> {
    pub article_id: i64,
    pub content: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = product_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductCommentRow {
    pub id: i64,
    pub product_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProductCommentRow> for Comment {
    fn from(row: ProductCommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            parent: CommentParent::Product(ProductId::new(row.product_id)),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = product_comments)]
pub(crate) struct NewProductCommentRow<'a> {
    pub product_id: i64,
    pub content: &'a str,
}
