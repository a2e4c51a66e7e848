//! Builders for the HTTP state ports.

use std::sync::Arc;

use tracing::warn;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselArticleRepository, DieselCommentRepository, DieselProductRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::new(
        Arc::new(DieselArticleRepository::new(pool.clone())),
        Arc::new(DieselProductRepository::new(pool.clone())),
        Arc::new(DieselCommentRepository::new(pool.clone())),
    )
}

/// Build handler state from the configured pool, falling back to a
/// process-local store when no database is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => diesel_state(pool),
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            HttpState::in_memory(&MemoryStore::new())
        }
    }
}
