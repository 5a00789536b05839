//! # medrec-sql-core
//!
//! Statement construction for the medrec record store.
//!
//! This crate provides:
//! - An immutable table schema model with typed columns and constraint clauses
//! - A statement builder for SELECT (filter, order, limit, offset, group by),
//!   `CREATE TABLE IF NOT EXISTS`, and positional batch INSERT templates
//! - Dialect-specific bind markers (`?`, `%s`, `$n`)
//!
//! ## Building statements
//!
//! ```rust
//! use medrec_sql_core::{Condition, Direction, SqlType, Statement, StatementBuilder, TableSchema};
//!
//! let schema = TableSchema::builder("INTERACTION")
//!     .column("id", SqlType::Int)
//!     .column("insurance_no", SqlType::Varchar)
//!     .column("health_status", SqlType::Int)
//!     .constraint("PRIMARY KEY (id)")
//!     .build()?;
//!
//! let builder = StatementBuilder::new();
//!
//! assert_eq!(
//!     builder.create(&schema).construct_query(),
//!     "CREATE TABLE IF NOT EXISTS INTERACTION \
//!      (id INT,insurance_no VARCHAR(255),health_status INT, PRIMARY KEY (id));"
//! );
//!
//! let status = schema.column("health_status").unwrap();
//! let sql = builder
//!     .select(&["*"], schema.name())?
//!     .conditions(&[Condition::gte(status, 5)], &[])?
//!     .order_by("id", Direction::Desc)?
//!     .limit(10)
//!     .construct_query();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM INTERACTION WHERE  INTERACTION.health_status >= 5 ORDER BY id DESC LIMIT 10;"
//! );
//! # Ok::<(), medrec_sql_core::SqlError>(())
//! ```
//!
//! ## Literal safety
//!
//! Condition values are written into statement text, single-quoted with
//! embedded quotes doubled for text-like columns and checked to be integers
//! for integer columns. Batch INSERT row values are never written into text.
//! Table and column names are trusted identifiers and are emitted unchanged.

pub mod builder;
pub mod dialect;
pub mod error;
pub mod schema;

pub use builder::{
    Combinator, Condition, CreateTable, Direction, InsertBatch, Operator, SelectQuery, SqlValue,
    Statement, StatementBuilder, ToSqlValue,
};
pub use dialect::{Dialect, GenericDialect, MySqlDialect, PostgresDialect};
pub use error::{Result, SqlError};
pub use schema::{Column, ColumnRef, ConstraintKind, SqlType, TableSchema, TableSchemaBuilder};
