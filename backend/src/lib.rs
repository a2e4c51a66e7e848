//! Market board backend.
//!
//! A REST service for a community bulletin board (articles) and a
//! secondhand marketplace (products), each with comments. The crate follows
//! a ports-and-adapters layout:
//!
//! - [`domain`]: entities, validation, listing rules, and the repository ports.
//! - [`inbound`]: Actix handlers translating HTTP into port calls.
//! - [`outbound`]: Diesel/PostgreSQL and in-memory port implementations.
//! - [`middleware`]: request tracing.
//! - [`server`]: application and listener assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
