//! Lazily opened, process-wide database handle.
//!
//! `main` builds one [`LazyDatabase`] and shares it through `AppState`. Nothing
//! touches the network until the first [`LazyDatabase::connection`] call; that
//! call reads the connection string, opens the pool once and caches it. A
//! missing setting or a failed connect leaves the cache empty so a later call
//! tries again.

use std::future::Future;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::PoolSettings;
use crate::error::StoreError;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Where the connection string comes from. Consulted on every open attempt,
/// never after a handle has been cached.
pub trait UrlSource: Send + Sync {
    /// The connection string, or `None` when it is unset or blank.
    fn database_url(&self) -> Option<String>;

    /// Setting name used in the not-configured error.
    fn setting_name(&self) -> &str;
}

/// Reads the connection string from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvUrl {
    var: String,
}

impl EnvUrl {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvUrl {
    fn default() -> Self {
        Self::new(DATABASE_URL_VAR)
    }
}

impl UrlSource for EnvUrl {
    fn database_url(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|url| !url.trim().is_empty())
    }

    fn setting_name(&self) -> &str {
        &self.var
    }
}

/// Opens the physical connection pool for a connection string.
pub trait Connector: Send + Sync {
    fn connect(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<DatabaseConnection, DbErr>> + Send;
}

/// Sea-ORM pool connector configured from [`PoolSettings`].
#[derive(Debug, Clone, Default)]
pub struct SeaOrmConnector {
    pool: PoolSettings,
}

impl SeaOrmConnector {
    pub fn new(pool: PoolSettings) -> Self {
        Self { pool }
    }
}

impl Connector for SeaOrmConnector {
    async fn connect(&self, url: &str) -> Result<DatabaseConnection, DbErr> {
        let mut options = ConnectOptions::new(url);
        options
            .max_connections(self.pool.max_connections)
            .min_connections(self.pool.min_connections)
            .connect_timeout(self.pool.connect_timeout)
            .sqlx_logging(self.pool.sql_logging);
        Database::connect(options).await
    }
}

/// Single shared database handle, opened on first use.
pub struct LazyDatabase<C = SeaOrmConnector> {
    cell: OnceCell<DatabaseConnection>,
    source: Box<dyn UrlSource>,
    connector: C,
}

impl LazyDatabase<SeaOrmConnector> {
    /// Manager reading `DATABASE_URL` and opening a pool tuned by `pool`.
    pub fn from_env(pool: PoolSettings) -> Self {
        Self::new(EnvUrl::default(), SeaOrmConnector::new(pool))
    }

    /// Manager wrapping an already open connection. Behaves exactly like a
    /// lazily opened one; after [`close`](Self::close) it reopens from `DATABASE_URL`.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            cell: OnceCell::new_with(Some(conn)),
            source: Box::new(EnvUrl::default()),
            connector: SeaOrmConnector::default(),
        }
    }
}

impl<C: Connector> LazyDatabase<C> {
    pub fn new(source: impl UrlSource + 'static, connector: C) -> Self {
        Self {
            cell: OnceCell::new(),
            source: Box::new(source),
            connector,
        }
    }

    /// Return the shared handle, opening it on the first successful call.
    ///
    /// Concurrent first callers wait on a single open attempt; at most one pool
    /// is ever built per successful initialization.
    pub async fn connection(&self) -> Result<&DatabaseConnection, StoreError> {
        self.cell.get_or_try_init(|| self.open()).await
    }

    /// Liveness probe: open the handle if needed and run a no-op query.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.connection().await?.ping().await.map_err(StoreError::from)
    }

    /// Whether a handle is currently cached.
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Close the cached pool, if any. The next `connection()` reopens it.
    pub async fn close(&mut self) -> Result<(), StoreError> {
        if let Some(conn) = self.cell.take() {
            conn.close().await?;
            info!("database connection closed");
        }
        Ok(())
    }

    async fn open(&self) -> Result<DatabaseConnection, StoreError> {
        let setting = self.source.setting_name();
        let Some(url) = self.source.database_url() else {
            warn!(setting, "database connection string not set");
            return Err(StoreError::NotConfigured(setting.to_owned()));
        };
        let conn = self
            .connector
            .connect(&url)
            .await
            .map_err(StoreError::Unavailable)?;
        info!(backend = ?conn.get_database_backend(), "database connection established");
        Ok(conn)
    }
}
