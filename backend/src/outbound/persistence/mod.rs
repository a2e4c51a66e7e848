//! PostgreSQL adapters built on Diesel, `diesel-async`, and a `bb8` pool.
//!
//! Adapters translate between row structs and domain types and map store
//! failures onto [`PersistenceError`](crate::domain::ports::PersistenceError).
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module.
//!
//! ```ignore
//! use market_board::outbound::persistence::{DbPool, DieselArticleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/market")).await?;
//! let articles = DieselArticleRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_comment_repository;
mod diesel_product_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;
mod search;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
