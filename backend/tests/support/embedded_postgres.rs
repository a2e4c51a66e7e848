//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! Each test binary shares one cluster. Every test gets its own database,
//! cloned from a template that already has the migrations applied, so suites
//! never see each other's rows.
//!
//! Setup failures panic unless `SKIP_TEST_CLUSTER` is truthy, in which case
//! the test prints a skip marker and returns early.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

use market_board::outbound::persistence::{DbPool, PoolConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "market_template";
const SETUP_RETRIES: usize = 5;
const SETUP_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated, empty database plus the runtime that drives the adapters.
///
/// Fields drop in order: the pool closes its connections before the
/// temporary database is removed.
pub struct TestDatabase {
    /// Runtime for `block_on`; the adapters are async, the cluster API is not.
    pub runtime: Runtime,
    /// Pool over the temporary database.
    pub pool: DbPool,
    url: String,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    /// Connection URL of the temporary database.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Blocking connection for raw SQL the ports do not expose.
    pub fn raw_connection(&self) -> PgConnection {
        PgConnection::establish(self.url()).expect("raw connection to the test database")
    }
}

/// Provision a fresh database, or apply the skip policy on failure.
pub fn test_database() -> Option<TestDatabase> {
    match provision() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn provision() -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;
    let url = database.url().to_string();

    let config = PoolConfig::new(url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestDatabase {
        runtime,
        pool,
        url,
        _database: database,
    })
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt >= SETUP_RETRIES => return Err(format!("{err:?}")),
            Err(_) => {
                std::thread::sleep(SETUP_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Reused data directories keep their original password, so it must not be
/// regenerated between test binaries.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads; the shared
        // cluster singleton serialises bootstrap.
        unsafe {
            std::env::set_var("PG_PASSWORD", "market_embedded_test");
        }
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the template database on first use and migrate it.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }

    Ok(template_name)
}

fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("create database from template: no attempt made");
    for attempt in 1..=SETUP_RETRIES {
        let provisioned = ensure_template_database(cluster).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match provisioned {
            Ok(database) => return Ok(database),
            Err(err) => last_error = format!("attempt {attempt}/{SETUP_RETRIES}: {err}"),
        }
        if attempt < SETUP_RETRIES {
            std::thread::sleep(SETUP_RETRY_DELAY);
        }
    }
    Err(last_error)
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Whether `SKIP_TEST_CLUSTER` is set to `1`, `true`, or `yes`.
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
