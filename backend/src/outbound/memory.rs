//! In-process implementation of every persistence port.
//!
//! Used when no database URL is configured, and by the HTTP tests. Ordering,
//! filtering, and windowing go through the same domain comparators and
//! pagination primitives the SQL adapters mirror, and windows pass the same
//! range check, so both back ends return identical listings. Deleting an
//! owner removes its comments.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    ArticleRepository, CommentRepository, PersistenceError, ProductRepository,
};
use crate::domain::{
    Article, ArticleDraft, ArticleId, ArticleListQuery, ArticlePatch, Comment, CommentDraft,
    CommentId, CommentKind, CommentListRequest, CommentParent, CommentPatch, CommentScope,
    Product, ProductDraft, ProductId, ProductListQuery, ProductPage, ProductPatch,
};

#[derive(Debug, Default)]
struct Tables {
    articles: BTreeMap<ArticleId, Article>,
    products: BTreeMap<ProductId, Product>,
    article_comments: BTreeMap<CommentId, Comment>,
    product_comments: BTreeMap<CommentId, Comment>,
    last_id: LastIds,
}

#[derive(Debug, Default)]
struct LastIds {
    article: i64,
    product: i64,
    article_comment: i64,
    product_comment: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter = counter.saturating_add(1);
    *counter
}

impl Tables {
    fn comments(&self, kind: CommentKind) -> &BTreeMap<CommentId, Comment> {
        match kind {
            CommentKind::Article => &self.article_comments,
            CommentKind::Product => &self.product_comments,
        }
    }

    fn comments_mut(&mut self, kind: CommentKind) -> &mut BTreeMap<CommentId, Comment> {
        match kind {
            CommentKind::Article => &mut self.article_comments,
            CommentKind::Product => &mut self.product_comments,
        }
    }

    fn parent_exists(&self, parent: CommentParent) -> bool {
        match parent {
            CommentParent::Article(id) => self.articles.contains_key(&id),
            CommentParent::Product(id) => self.products.contains_key(&id),
        }
    }

    fn next_comment_id(&mut self, kind: CommentKind) -> CommentId {
        let counter = match kind {
            CommentKind::Article => &mut self.last_id.article_comment,
            CommentKind::Product => &mut self.last_id.product_comment,
        };
        CommentId::new(next(counter))
    }
}

/// Shared in-memory tables. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

fn poisoned<T>(_: PoisonError<T>) -> PersistenceError {
    PersistenceError::query("in-memory store lock poisoned")
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PersistenceError> {
        self.tables.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PersistenceError> {
        self.tables.write().map_err(poisoned)
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, PersistenceError> {
        let mut tables = self.write()?;
        let article = Article {
            id: ArticleId::new(next(&mut tables.last_id.article)),
            title: draft.title().to_owned(),
            content: draft.content().to_owned(),
            created_at: Utc::now(),
        };
        tables.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, PersistenceError> {
        Ok(self.read()?.articles.get(&id).cloned())
    }

    async fn list(&self, query: &ArticleListQuery) -> Result<Vec<Article>, PersistenceError> {
        query.bounds()?;
        let tables = self.read()?;
        let mut matching: Vec<&Article> = tables
            .articles
            .values()
            .filter(|article| {
                query
                    .keyword
                    .matches_any(&[article.title.as_str(), article.content.as_str()])
            })
            .collect();
        matching.sort_by(|a, b| query.order.compare(a, b));
        Ok(query
            .window
            .slice(&matching)
            .iter()
            .map(|article| (*article).clone())
            .collect())
    }

    async fn update(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, PersistenceError> {
        let mut tables = self.write()?;
        let Some(current) = tables.articles.remove(&id) else {
            return Ok(None);
        };
        let merged = current.merge(patch.clone());
        tables.articles.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, PersistenceError> {
        let mut tables = self.write()?;
        let removed = tables.articles.remove(&id).is_some();
        if removed {
            tables
                .article_comments
                .retain(|_, comment| comment.parent != CommentParent::Article(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, PersistenceError> {
        let mut tables = self.write()?;
        let product = Product {
            id: ProductId::new(next(&mut tables.last_id.product)),
            name: draft.name().to_owned(),
            description: draft.description().to_owned(),
            price: draft.price(),
            tags: draft.tags().to_vec(),
            favorite_count: 0,
            created_at: Utc::now(),
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PersistenceError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn list(&self, query: &ProductListQuery) -> Result<ProductPage, PersistenceError> {
        query.bounds()?;
        let tables = self.read()?;
        let mut matching: Vec<&Product> = tables
            .products
            .values()
            .filter(|product| {
                query
                    .keyword
                    .matches_any(&[product.name.as_str(), product.description.as_str()])
            })
            .collect();
        matching.sort_by(|a, b| query.order.compare(a, b));
        Ok(ProductPage {
            total_count: u64::try_from(matching.len()).unwrap_or(u64::MAX),
            products: query
                .window
                .slice(&matching)
                .iter()
                .map(|product| (*product).clone())
                .collect(),
        })
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, PersistenceError> {
        let mut tables = self.write()?;
        let Some(current) = tables.products.remove(&id) else {
            return Ok(None);
        };
        let merged = current.merge(patch.clone());
        tables.products.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, PersistenceError> {
        let mut tables = self.write()?;
        let removed = tables.products.remove(&id).is_some();
        if removed {
            tables
                .product_comments
                .retain(|_, comment| comment.parent != CommentParent::Product(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(
        &self,
        parent: CommentParent,
        draft: &CommentDraft,
    ) -> Result<Comment, PersistenceError> {
        let mut tables = self.write()?;
        if !tables.parent_exists(parent) {
            return Err(PersistenceError::missing_parent(parent.to_string()));
        }
        let comment = Comment {
            id: tables.next_comment_id(parent.kind()),
            parent,
            content: draft.content().to_owned(),
            created_at: Utc::now(),
        };
        tables
            .comments_mut(parent.kind())
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list(&self, request: &CommentListRequest) -> Result<Vec<Comment>, PersistenceError> {
        let tables = self.read()?;
        let mut scoped: Vec<&Comment> = tables
            .comments(request.scope.kind())
            .values()
            .filter(|comment| match request.scope {
                CommentScope::All(_) => true,
                CommentScope::Parent(parent) => comment.parent == parent,
            })
            .collect();
        scoped.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(request
            .window
            .select(scoped, |comment| &comment.id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        kind: CommentKind,
        id: CommentId,
        patch: &CommentPatch,
    ) -> Result<Option<Comment>, PersistenceError> {
        let mut tables = self.write()?;
        let comments = tables.comments_mut(kind);
        let Some(current) = comments.remove(&id) else {
            return Ok(None);
        };
        let merged = current.merge(patch.clone());
        comments.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, kind: CommentKind, id: CommentId) -> Result<bool, PersistenceError> {
        Ok(self.write()?.comments_mut(kind).remove(&id).is_some())
    }
}
