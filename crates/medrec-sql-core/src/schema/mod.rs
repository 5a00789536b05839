//! Table schema model.
//!
//! A [`TableSchema`] describes a table as a name, an ordered list of typed
//! columns and a list of constraint clauses. It feeds `CREATE TABLE`
//! generation and resolves a condition's column to its declared type.
//!
//! ```rust
//! use medrec_sql_core::schema::{SqlType, TableSchema, primary_key};
//!
//! let schema = TableSchema::builder("PATIENT")
//!     .column("insurance_no", SqlType::Varchar)
//!     .column("age", SqlType::Int)
//!     .constraint(primary_key(&["insurance_no"]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.column("age").map(|c| c.definition()), Some("age INT".into()));
//! ```

mod table;
mod types;

pub use table::{Column, ColumnRef, TableSchema, TableSchemaBuilder};
pub use types::{foreign_key, primary_key, ConstraintKind, SqlType};
