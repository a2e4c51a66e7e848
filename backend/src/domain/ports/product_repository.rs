//! Port for product persistence.

use async_trait::async_trait;

use crate::domain::{Product, ProductDraft, ProductId, ProductListQuery, ProductPage, ProductPatch};

use super::PersistenceError;

/// Storage operations backing the `/products` routes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product with a zero favourite count.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, PersistenceError>;

    /// Fetch one product.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PersistenceError>;

    /// Fetch the window of products matching `query` and the filtered total.
    async fn list(&self, query: &ProductListQuery) -> Result<ProductPage, PersistenceError>;

    /// Merge `patch` into the stored product. `None` when the id is unknown.
    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, PersistenceError>;

    /// Remove the product and its comments. `false` when the id is unknown.
    async fn delete(&self, id: ProductId) -> Result<bool, PersistenceError>;
}
