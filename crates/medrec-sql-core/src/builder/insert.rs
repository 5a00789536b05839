//! Batch INSERT templates.
//!
//! The template carries one positional marker per column. Row values are
//! never rendered into the text; the caller binds row tuples to the markers
//! in column order.

use super::value::SqlValue;
use super::Statement;
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// `INSERT INTO table (a,b) VALUES (?,?)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct InsertBatch {
    sql: String,
    table: String,
    columns: Vec<String>,
}

impl InsertBatch {
    pub(crate) fn new<S: AsRef<str>>(
        dialect: &impl Dialect,
        table: &str,
        columns: &[S],
    ) -> Result<Self> {
        if table.is_empty() {
            return Err(SqlError::query("INSERT table name is empty"));
        }
        if columns.is_empty() {
            return Err(SqlError::query("INSERT needs at least one column"));
        }
        let columns: Vec<String> = columns.iter().map(|c| String::from(c.as_ref())).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(","),
            dialect.placeholders(columns.len())
        );
        Ok(Self {
            sql,
            table: String::from(table),
            columns,
        })
    }

    /// The target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The column header, in marker order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of bind markers, always equal to the column count.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.columns.len()
    }

    /// Checks that a row tuple matches the column header.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`] on an arity mismatch.
    pub fn check_row(&self, row: &[SqlValue]) -> Result<()> {
        if row.len() == self.columns.len() {
            Ok(())
        } else {
            Err(SqlError::query(format!(
                "row has {} values but {} expects {} columns",
                row.len(),
                self.table,
                self.columns.len()
            )))
        }
    }
}

impl Statement for InsertBatch {
    fn as_sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, MySqlDialect, PostgresDialect};

    #[test]
    fn test_insert_template() {
        let insert = InsertBatch::new(&GenericDialect, "table", &["col1", "col2"]).unwrap();
        assert_eq!(
            insert.construct_query(),
            "INSERT INTO table (col1,col2) VALUES (?,?);"
        );
        assert_eq!(insert.placeholder_count(), 2);
        assert_eq!(insert.columns(), ["col1", "col2"]);
    }

    #[test]
    fn test_placeholder_styles() {
        let mysql = InsertBatch::new(&MySqlDialect, "table", &["col1", "col2"]).unwrap();
        assert_eq!(
            mysql.construct_query(),
            "INSERT INTO table (col1,col2) VALUES (%s,%s);"
        );

        let pg = InsertBatch::new(&PostgresDialect, "t", &["a", "b", "c"]).unwrap();
        assert_eq!(pg.construct_query(), "INSERT INTO t (a,b,c) VALUES ($1,$2,$3);");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(InsertBatch::new(&GenericDialect, "", &["a"]).is_err());
        assert!(InsertBatch::new::<&str>(&GenericDialect, "t", &[]).is_err());
    }

    #[test]
    fn test_check_row() {
        let insert = InsertBatch::new(&GenericDialect, "t", &["a", "b"]).unwrap();
        assert!(insert
            .check_row(&[SqlValue::Int(1), SqlValue::Text("x".into())])
            .is_ok());
        let err = insert.check_row(&[SqlValue::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            SqlError::InvalidQuery(String::from("row has 1 values but t expects 2 columns"))
        );
    }
}
