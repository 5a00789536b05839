//! Statement builder.
//!
//! [`StatementBuilder`] is a stateless factory. Each top-level call
//! (`select`, `create`, `insert_batch`) returns a fresh statement value, so a
//! new statement can never inherit clauses from a previous one. SELECT
//! clauses are chained on the returned [`SelectQuery`] and
//! [`Statement::construct_query`] produces the final text.
//!
//! # Example
//!
//! ```rust
//! use medrec_sql_core::builder::{Condition, Statement, StatementBuilder};
//! use medrec_sql_core::schema::{Column, SqlType};
//!
//! let col1 = Column::new("col1", SqlType::Varchar);
//! let col2 = Column::new("col2", SqlType::Varchar);
//!
//! let sql = StatementBuilder::new()
//!     .select(&["col1", "col2"], "table")?
//!     .conditions(&[Condition::eq(&col1, "val1")], &[Condition::lte(&col2, "val2")])?
//!     .construct_query();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT col1,col2 FROM table WHERE  table.col1 = 'val1' AND  table.col2 <= 'val2';"
//! );
//! # Ok::<(), medrec_sql_core::SqlError>(())
//! ```
//!
//! Only condition literals are written into statement text, quoted by the
//! column's declared type. Table and column names are trusted identifiers
//! from calling code and are never sanitized; do not pass end-user input as
//! an identifier.

mod condition;
mod create;
mod insert;
mod operator;
mod select;
pub mod value;

pub use condition::Condition;
pub use create::CreateTable;
pub use insert::InsertBatch;
pub use operator::{Combinator, Direction, Operator};
pub use select::SelectQuery;
pub use value::{SqlValue, ToSqlValue};

use crate::dialect::{Dialect, GenericDialect};
use crate::error::Result;
use crate::schema::TableSchema;

/// A finished or in-progress statement.
pub trait Statement {
    /// The statement text without the terminating `;`.
    fn as_sql(&self) -> &str;

    /// Returns the statement text terminated by `;`.
    fn construct_query(&self) -> String {
        format!("{};", self.as_sql())
    }
}

/// Entry point for building statements in a given dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatementBuilder<D = GenericDialect> {
    dialect: D,
}

impl StatementBuilder<GenericDialect> {
    /// Creates a builder using `?` bind markers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dialect: GenericDialect,
        }
    }
}

impl<D: Dialect> StatementBuilder<D> {
    /// Creates a builder for a specific dialect.
    #[must_use]
    pub const fn with_dialect(dialect: D) -> Self {
        Self { dialect }
    }

    /// The dialect in use.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Starts `SELECT <columns> FROM <table>`. `columns` may be `["*"]`.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`](crate::SqlError::InvalidQuery) on an empty
    /// column list, an empty column name or an empty table name.
    pub fn select<S: AsRef<str>>(&self, columns: &[S], table: &str) -> Result<SelectQuery> {
        SelectQuery::new(columns, table)
    }

    /// Builds `CREATE TABLE IF NOT EXISTS` for `schema`.
    pub fn create(&self, schema: &TableSchema) -> CreateTable {
        CreateTable::new(schema)
    }

    /// Builds a positional INSERT template for `columns`.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`](crate::SqlError::InvalidQuery) on an empty
    /// table name or column list.
    pub fn insert_batch<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> Result<InsertBatch> {
        InsertBatch::new(&self.dialect, table, columns)
    }
}
