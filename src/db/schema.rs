//! SQL DDL for the `usuarios` and `grupos` tables.
//! Every statement is idempotent (`IF NOT EXISTS`).

use sqlx::AnyPool;
use tracing::info;

use crate::db::pool::Dialect;
use crate::error::CentroError;

/// MariaDB / MySQL schema.
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id INT AUTO_INCREMENT PRIMARY KEY,
    nombre VARCHAR(50) NOT NULL,
    apellidos VARCHAR(50) NOT NULL,
    sexo VARCHAR(50) NOT NULL,
    edad VARCHAR(50) NOT NULL,
    telefono VARCHAR(50) NOT NULL
);

CREATE TABLE IF NOT EXISTS grupos (
    id INT AUTO_INCREMENT PRIMARY KEY,
    nombre VARCHAR(50) NOT NULL
);
"#;

/// SQLite schema, same columns.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre VARCHAR(50) NOT NULL,
    apellidos VARCHAR(50) NOT NULL,
    sexo VARCHAR(50) NOT NULL,
    edad VARCHAR(50) NOT NULL,
    telefono VARCHAR(50) NOT NULL
);

CREATE TABLE IF NOT EXISTS grupos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre VARCHAR(50) NOT NULL
);
"#;

impl Dialect {
    pub fn schema(self) -> &'static str {
        match self {
            Dialect::MySql => MYSQL_INIT,
            Dialect::Sqlite => SQLITE_INIT,
        }
    }
}

/// Create both tables if they are missing.
pub async fn init_schema(pool: &AnyPool, dialect: Dialect) -> Result<(), CentroError> {
    let mut conn = pool.acquire().await?;
    // sqlx::query runs a single statement at a time
    for stmt in dialect.schema().split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut *conn).await?;
    }
    info!(?dialect, "database schema ready");
    Ok(())
}
