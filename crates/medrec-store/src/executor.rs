//! Row execution.
//!
//! [`RowExecutor`] is the seam between statement construction and a concrete
//! driver. Each call runs synchronously to completion on one connection;
//! chunked inserts are committed one transaction per call, and callers submit
//! chunks strictly in order.

use std::future::Future;
use std::str::FromStr;

use medrec_sql_core::{Dialect, GenericDialect, InsertBatch, SqlValue, Statement};
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row, Sqlite};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::record::Record;

/// Executes finished statements and returns rows.
pub trait RowExecutor: Send + Sync {
    /// Bind-marker style the driver expects.
    type Dialect: Dialect + Send + Sync;

    /// Returns the driver's dialect.
    fn dialect(&self) -> Self::Dialect;

    /// Runs a statement without parameters, returning the affected row count.
    fn execute(&self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Runs `insert` once per row inside a single transaction and commits.
    ///
    /// Nothing from the chunk is kept if any row fails.
    fn execute_chunk(
        &self,
        insert: &InsertBatch,
        rows: &[Vec<SqlValue>],
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Runs a query and returns every row.
    fn fetch_all(&self, sql: &str) -> impl Future<Output = Result<Vec<Record>>> + Send;
}

/// [`RowExecutor`] over a SQLite connection pool.
///
/// The pool is passed in explicitly and connections are returned to it when
/// each call completes.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool from `config`, creating the database file if needed.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config or URL, or when the pool cannot connect.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        debug!(url = %config.database_url, "Opened SQLite pool");
        Ok(Self::new(pool))
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl RowExecutor for SqliteExecutor {
    type Dialect = GenericDialect;

    fn dialect(&self) -> GenericDialect {
        GenericDialect::new()
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        debug!(sql = %sql, "Executing statement");
        let result = sqlx::query(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn execute_chunk(&self, insert: &InsertBatch, rows: &[Vec<SqlValue>]) -> Result<u64> {
        let sql = insert.construct_query();
        debug!(sql = %sql, rows = rows.len(), "Executing chunk");

        let mut tx = self.pool.begin().await?;
        let mut affected = 0;
        for row in rows {
            insert.check_row(row)?;
            let mut query = sqlx::query(&sql);
            for (column, value) in insert.columns().iter().zip(row) {
                query = bind_value(query, column, value)?;
            }
            affected += query.execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;
        Ok(affected)
    }

    async fn fetch_all(&self, sql: &str) -> Result<Vec<Record>> {
        debug!(sql = %sql, "Fetching rows");
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(decode_row).collect())
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    column: &str,
    value: &SqlValue,
) -> Result<Query<'q, Sqlite, SqliteArguments<'q>>> {
    match value {
        SqlValue::Null => Ok(query.bind(None::<String>)),
        SqlValue::Int(n) => Ok(query.bind(*n)),
        SqlValue::Text(s) => Ok(query.bind(s.clone())),
        SqlValue::List(_) => Err(StoreError::UnsupportedValue {
            column: column.to_string(),
            reason: String::from("value lists cannot be bound as a single parameter"),
        }),
    }
}

fn decode_row(row: &SqliteRow) -> Record {
    row.columns()
        .iter()
        .map(|column| {
            let ordinal = column.ordinal();
            let value = match row.try_get::<Option<i64>, _>(ordinal) {
                Ok(Some(n)) => SqlValue::Int(n),
                Ok(None) => SqlValue::Null,
                Err(_) => match row.try_get::<Option<String>, _>(ordinal) {
                    Ok(Some(s)) => SqlValue::Text(s),
                    Ok(None) => SqlValue::Null,
                    Err(_) => match row.try_get::<Option<f64>, _>(ordinal) {
                        Ok(Some(f)) => SqlValue::Text(f.to_string()),
                        _ => SqlValue::Null,
                    },
                },
            };
            (column.name().to_string(), value)
        })
        .collect()
}
