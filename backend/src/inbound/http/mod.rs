//! HTTP inbound adapter exposing the REST endpoints.

pub mod articles;
pub mod comments;
pub mod error;
pub mod health;
pub mod products;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
