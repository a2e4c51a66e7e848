//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MARKET_*` environment variables, and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Process configuration for the market board server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKET")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Absent means the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection before failing the request.
    pub db_connection_timeout_secs: Option<u64>,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl ServerSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .with_connection_timeout(Duration::from_secs(
                    self.db_connection_timeout_secs
                        .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
                )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("market-board")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env([
            ("MARKET_BIND_ADDR", None::<String>),
            ("MARKET_DATABASE_URL", None::<String>),
            ("MARKET_DB_MAX_CONNECTIONS", None::<String>),
            ("MARKET_DB_CONNECTION_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid literal")
        );
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MARKET_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "MARKET_DATABASE_URL",
                Some("postgres://market@localhost/market".to_owned()),
            ),
            ("MARKET_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("MARKET_DB_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://market@localhost/market");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            db_max_connections: None,
            db_connection_timeout_secs: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
