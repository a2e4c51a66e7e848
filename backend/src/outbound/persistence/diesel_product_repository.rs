//! PostgreSQL-backed `ProductRepository`.
//!
//! Listing runs the window query and the count query in one transaction so
//! `total_count` and the returned window observe the same snapshot.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{PersistenceError, ProductRepository};
use crate::domain::{
    Product, ProductDraft, ProductId, ProductListQuery, ProductOrder, ProductPage, ProductPatch,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductRow, ProductUpdate};
use super::pool::DbPool;
use super::schema::products;
use super::search::contains_pattern;

/// Diesel implementation of the product port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProductRow {
            name: draft.name(),
            description: draft.description(),
            price: draft.price(),
            tags: draft.tags(),
        };

        diesel::insert_into(products::table)
            .values(&row)
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .map(Product::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Product::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self, query: &ProductListQuery) -> Result<ProductPage, PersistenceError> {
        let bounds = query.bounds()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = query.keyword.as_deref().map(contains_pattern);

        let (rows, total) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let mut base = products::table.select(ProductRow::as_select()).into_boxed();
                    let mut counted = products::table.select(count_star()).into_boxed();
                    if let Some(pattern) = pattern {
                        // Name or description contains the keyword.
                        base = base.filter(
                            products::name
                                .like(pattern.clone())
                                .escape('\\')
                                .or(products::description.like(pattern.clone()).escape('\\')),
                        );
                        counted = counted.filter(
                            products::name
                                .like(pattern.clone())
                                .escape('\\')
                                .or(products::description.like(pattern).escape('\\')),
                        );
                    }
                    let ordered = match query.order {
                        ProductOrder::Recent => {
                            base.order((products::created_at.desc(), products::id.desc()))
                        }
                        ProductOrder::Favorite => base.order((
                            products::favorite_count.desc(),
                            products::created_at.desc(),
                            products::id.desc(),
                        )),
                    };
                    let rows: Vec<ProductRow> = ordered
                        .offset(bounds.offset())
                        .limit(bounds.limit())
                        .load(conn)
                        .await?;
                    let total: i64 = counted.get_result(conn).await?;
                    Ok((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(ProductPage {
            total_count: u64::try_from(total).unwrap_or_default(),
            products: rows.into_iter().map(Product::from).collect(),
        })
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let current = products::table
                        .find(id.get())
                        .select(ProductRow::as_select())
                        .for_update()
                        .first::<ProductRow>(conn)
                        .await
                        .optional()?;
                    let Some(current) = current else {
                        return Ok(None);
                    };

                    let merged = Product::from(current).merge(patch.clone());
                    let changes = ProductUpdate {
                        name: &merged.name,
                        description: &merged.description,
                        price: merged.price,
                        tags: &merged.tags,
                    };
                    diesel::update(products::table.find(id.get()))
                        .set(&changes)
                        .returning(ProductRow::as_returning())
                        .get_result::<ProductRow>(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(updated.map(Product::from))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(products::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
