//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters depend on these traits only; the outbound adapters in
//! `crate::outbound` provide the implementations.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod comment_repository;
mod persistence_error;
mod product_repository;

pub use article_repository::ArticleRepository;
#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use persistence_error::PersistenceError;
pub use product_repository::ProductRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
