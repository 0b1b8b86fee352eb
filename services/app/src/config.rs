use std::time::Duration;

/// Connection pool tuning for the lazily opened database handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on pooled connections (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub max_connections: u32,
    /// Connections kept open while idle (default 0). Env var: `DATABASE_MIN_CONNECTIONS`.
    pub min_connections: u32,
    /// Timeout for establishing a connection (default 8s). Env var: `DATABASE_CONNECT_TIMEOUT_SECS`.
    pub connect_timeout: Duration,
    /// Log every SQL statement at debug level (default false). Env var: `DATABASE_SQL_LOGGING`.
    pub sql_logging: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            connect_timeout: Duration::from_secs(8),
            sql_logging: false,
        }
    }
}

impl PoolSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(defaults.min_connections),
            connect_timeout: env_parse("DATABASE_CONNECT_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            sql_logging: env_parse("DATABASE_SQL_LOGGING").unwrap_or(defaults.sql_logging),
        }
    }
}

/// App service configuration loaded from environment variables.
///
/// `DATABASE_URL` is deliberately absent: the connection manager reads it on
/// first database access so the process can boot before the store is configured.
#[derive(Debug)]
pub struct AppConfig {
    /// TCP port for the HTTP server (default 3000). Env var: `APP_PORT`.
    pub app_port: u16,
    pub pool: PoolSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            app_port: env_parse("APP_PORT").unwrap_or(3000),
            pool: PoolSettings::from_env(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
