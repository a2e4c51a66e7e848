//! Backend entry-point: loads settings, wires the store, and runs the server.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use market_board::inbound::http::health::HealthState;
use market_board::outbound::persistence::DbPool;
use market_board::server::{ServerConfig, create_server};
use market_board::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
        }
    });

    // The pool lives inside the app factory and closes once the workers drain.
    server.await
}
