use sqlx::{AnyPool, Row};
use std::marker::PhantomData;

use crate::db::entity::{
    Entity, delete_sql, insert_returning_id_sql, insert_sql, select_all_sql, select_by_id_sql,
    update_sql,
};
use crate::db::pool::Dialect;
use crate::error::CentroError;

/// CRUD access to one table.
///
/// Every method checks out a single connection, runs one statement and
/// returns the connection to the pool when it goes out of scope, on the
/// error path as well.
pub struct Storage<E> {
    pool: AnyPool,
    dialect: Dialect,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Storage<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            dialect: self.dialect,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Storage<E> {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self {
            pool,
            dialect,
            _entity: PhantomData,
        }
    }

    /// Insert a row. Returns the generated id.
    pub async fn create(&self, payload: E::Payload) -> Result<i64, CentroError> {
        let mut conn = self.pool.acquire().await?;
        match self.dialect {
            Dialect::MySql => {
                let sql = insert_sql::<E>();
                let result = E::bind(payload, sqlx::query(&sql))
                    .execute(&mut *conn)
                    .await?;
                result.last_insert_id().ok_or(CentroError::MissingInsertId)
            }
            Dialect::Sqlite => {
                let sql = insert_returning_id_sql::<E>();
                let row = E::bind(payload, sqlx::query(&sql))
                    .fetch_one(&mut *conn)
                    .await?;
                Ok(row.try_get("id")?)
            }
        }
    }

    /// All rows, in whatever order the database returns them.
    pub async fn list(&self) -> Result<Vec<E>, CentroError> {
        let mut conn = self.pool.acquire().await?;
        let sql = select_all_sql::<E>();
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
        rows.iter()
            .map(|row| E::from_row(row).map_err(CentroError::from))
            .collect()
    }

    /// First row with this id, if any.
    pub async fn get(&self, id: i64) -> Result<Option<E>, CentroError> {
        let mut conn = self.pool.acquire().await?;
        let sql = select_by_id_sql::<E>();
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.as_ref().map(E::from_row).transpose()?)
    }

    /// Replace every column of the row. Returns the affected row count.
    pub async fn update(&self, id: i64, payload: E::Payload) -> Result<u64, CentroError> {
        let mut conn = self.pool.acquire().await?;
        let sql = update_sql::<E>();
        let result = E::bind(payload, sqlx::query(&sql))
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns the affected row count.
    pub async fn delete(&self, id: i64) -> Result<u64, CentroError> {
        let mut conn = self.pool.acquire().await?;
        let sql = delete_sql::<E>();
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}
