//! Connection handle and the startup sequence.
//!
//! Startup runs synchronously once, before the service takes traffic:
//! resolve the descriptor, open the pooled connection, publish it to the
//! registry, then trigger migration. Any failure before the registry is
//! written leaves it untouched.

use std::fs;
use std::str::FromStr;
use std::sync::Once;

use sqlx::any::AnyConnectOptions;
use sqlx::{AnyPool, ConnectOptions};
use tracing::info;

use crate::config::{Backend, DatabaseConfig, ProcessMode};
use crate::dialect::ConnectionDescriptor;
use crate::error::{Result, StoreError};
use crate::migrate::Migrator;
use crate::naming::TablePrefix;
use crate::pool::PoolPolicy;
use crate::registry;

static DRIVERS: Once = Once::new();

/// The live, pooled connection shared by every consumer for the process
/// lifetime. Clones share the same pool; no consumer closes it
/// individually.
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    backend: Backend,
    naming: TablePrefix,
}

impl Database {
    /// Open the backend described by the descriptor, with pool limits
    /// applied at construction.
    pub(crate) async fn open(
        descriptor: &ConnectionDescriptor,
        policy: &PoolPolicy,
        debug: bool,
        naming: TablePrefix,
    ) -> Result<Self> {
        if let Some(file) = descriptor.file() {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        let pool =
            open_pool(descriptor.url(), policy, debug, descriptor.backend()).await?;
        Ok(Self {
            pool,
            backend: descriptor.backend(),
            naming,
        })
    }

    /// Open a fresh in-memory store, isolated per invocation and never
    /// persisted. The descriptor plays no part here.
    pub(crate) async fn open_ephemeral(debug: bool, naming: TablePrefix) -> Result<Self> {
        // The ephemeral store is a single in-memory SQLite database;
        // separate pooled connections to `:memory:` would each see a
        // private database, so the single-writer policy applies.
        let policy = PoolPolicy::for_backend(Backend::Sqlite);
        let pool = open_pool("sqlite::memory:", &policy, debug, Backend::Sqlite).await?;
        Ok(Self {
            pool,
            backend: Backend::Sqlite,
            naming,
        })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Render a logical table name through the configured prefix.
    pub fn table_name(&self, raw: &str) -> String {
        self.naming.apply(raw)
    }

    /// Close the underlying pool. Intended for shutdown paths that have
    /// taken the handle back out of the registry.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn open_pool(
    url: &str,
    policy: &PoolPolicy,
    debug: bool,
    backend: Backend,
) -> Result<AnyPool> {
    DRIVERS.call_once(sqlx::any::install_default_drivers);

    info!(backend = ?backend, "initializing database connection");

    let options = AnyConnectOptions::from_str(url).map_err(StoreError::open_failed)?;
    let options = if debug {
        options.log_statements(log::LevelFilter::Info)
    } else {
        options.disable_statement_logging()
    };

    policy
        .pool_options()
        .connect_with(options)
        .await
        .map_err(StoreError::open_failed)
}

/// Open the configured backend and return the tuned handle without
/// touching the registry.
///
/// Test mode ignores the backend configuration entirely and opens an
/// ephemeral store; descriptor resolution is skipped, so an invalid tag
/// only matters in normal mode.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let naming = TablePrefix::new(config.table_prefix.clone());

    match config.mode {
        ProcessMode::Test => Database::open_ephemeral(config.debug, naming).await,
        ProcessMode::Normal => {
            let descriptor = ConnectionDescriptor::resolve(config)?;
            let policy = PoolPolicy::for_backend(descriptor.backend());
            Database::open(&descriptor, &policy, config.debug, naming).await
        }
    }
}

/// Full startup sequence: connect, publish the handle to the registry,
/// then trigger schema migration.
///
/// Returns the handle so the caller can also thread it through
/// explicitly. Whether a failure here terminates the process is the
/// caller's decision.
pub async fn startup<M: Migrator + ?Sized>(
    config: &DatabaseConfig,
    migrator: &M,
) -> Result<Database> {
    let db = connect(config).await?;
    if let Err(err) = registry::install(db.clone()) {
        db.close().await;
        return Err(err);
    }

    migrator
        .migrate(&db)
        .await
        .map_err(StoreError::migration)?;

    Ok(db)
}
