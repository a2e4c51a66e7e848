//! Outbound adapters implementing the domain persistence ports.
//!
//! - **persistence**: PostgreSQL through Diesel.
//! - **memory**: process-local tables for development without a database and
//!   for tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
