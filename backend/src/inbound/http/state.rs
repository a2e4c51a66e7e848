//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{ArticleRepository, CommentRepository, ProductRepository};
use crate::outbound::memory::MemoryStore;

/// Port implementations used by the handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Article storage.
    pub articles: Arc<dyn ArticleRepository>,
    /// Product storage.
    pub products: Arc<dyn ProductRepository>,
    /// Storage for both comment families.
    pub comments: Arc<dyn CommentRepository>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        products: Arc<dyn ProductRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            articles,
            products,
            comments,
        }
    }

    /// Serve every port from one shared in-memory store.
    pub fn in_memory(store: &MemoryStore) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }
}
