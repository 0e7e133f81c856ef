//! Connection pool construction.
//!
//! The pool is built lazily: no connection is opened until the first
//! acquire, which is normally the readiness check.

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::time::Duration;

use crate::error::CentroError;

/// Upper bound on concurrently open database connections.
pub const CONNECTION_LIMIT: u32 = 5;

/// How long a request waits for a free connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// SQL flavour behind the pool, derived from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(database_url: &str) -> Result<Self, CentroError> {
        let scheme = database_url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(CentroError::UnsupportedScheme(scheme)),
        }
    }
}

/// Create a lazy pool with the default limits.
pub fn connect_lazy(database_url: &str) -> Result<(AnyPool, Dialect), CentroError> {
    connect_lazy_with_options(database_url, CONNECTION_LIMIT, ACQUIRE_TIMEOUT)
}

pub fn connect_lazy_with_options(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<(AnyPool, Dialect), CentroError> {
    let dialect = Dialect::from_url(database_url)?;
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;
    Ok((pool, dialect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_follows_scheme() {
        assert_eq!(
            Dialect::from_url("mysql://root@localhost:3306/centro").unwrap(),
            Dialect::MySql
        );
        assert_eq!(
            Dialect::from_url("mariadb://root@db/centro").unwrap(),
            Dialect::MySql
        );
        assert_eq!(
            Dialect::from_url("sqlite:///tmp/x.sqlite?mode=rwc").unwrap(),
            Dialect::Sqlite
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = Dialect::from_url("postgres://localhost/centro").unwrap_err();
        assert!(matches!(err, CentroError::UnsupportedScheme(s) if s == "postgres"));
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        // Nothing listens here; building the pool must still succeed.
        let (pool, dialect) = connect_lazy("mysql://root@127.0.0.1:1/centro").unwrap();
        assert_eq!(dialect, Dialect::MySql);
        assert_eq!(pool.size(), 0);
    }
}
