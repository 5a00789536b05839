//! SELECT statements.
//!
//! Clauses are appended in the order they are called. No canonical clause
//! ordering is imposed: calling `group_by` after `order_by` emits
//! `ORDER BY ... GROUP BY ...`.

use super::condition::{render_group, Condition};
use super::operator::{Combinator, Direction};
use super::Statement;
use crate::error::{Result, SqlError};

/// A SELECT statement under construction.
///
/// Every clause method consumes the statement and returns it extended, so a
/// statement can never pick up clauses from an unrelated one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SelectQuery {
    sql: String,
    table: String,
}

impl SelectQuery {
    pub(crate) fn new<S: AsRef<str>>(columns: &[S], table: &str) -> Result<Self> {
        if columns.is_empty() {
            return Err(SqlError::query("SELECT needs at least one column"));
        }
        if columns.iter().any(|c| c.as_ref().is_empty()) {
            return Err(SqlError::query("SELECT column name is empty"));
        }
        if table.is_empty() {
            return Err(SqlError::query("SELECT table name is empty"));
        }
        let columns: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
        Ok(Self {
            sql: format!("SELECT {} FROM {table}", columns.join(",")),
            table: String::from(table),
        })
    }

    /// The table conditions are qualified with.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Appends a WHERE clause.
    ///
    /// `intersections` are joined with `AND`, `unions` with `OR`. When both
    /// groups are present they are joined with `AND`; a union group of more
    /// than one condition is then parenthesized so the OR stays inside it.
    /// When only one group is present, only that group is emitted.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`] when both groups are empty or a condition
    /// value does not fit its column.
    pub fn conditions(mut self, intersections: &[Condition], unions: &[Condition]) -> Result<Self> {
        let all = render_group(&self.table, intersections, Combinator::And)?;
        let any = render_group(&self.table, unions, Combinator::Or)?;
        let body = match (all, any) {
            (Some(all), Some(any)) if unions.len() > 1 => {
                format!("{all}{}({})", Combinator::And.separator(), any.trim_start())
            }
            (Some(all), Some(any)) => format!("{all}{}{any}", Combinator::And.separator()),
            (Some(group), None) | (None, Some(group)) => group,
            (None, None) => {
                return Err(SqlError::query(
                    "conditions need at least one intersection or union",
                ));
            }
        };

        self.sql.push_str(" WHERE ");
        self.sql.push_str(&body);
        Ok(self)
    }

    /// Appends `ORDER BY column direction`.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`] when `column` is empty.
    pub fn order_by(mut self, column: &str, direction: Direction) -> Result<Self> {
        if column.is_empty() {
            return Err(SqlError::query("ORDER BY column name is empty"));
        }
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(column);
        self.sql.push(' ');
        self.sql.push_str(direction.as_sql());
        Ok(self)
    }

    /// Appends `LIMIT n`. Bounds are the caller's concern.
    pub fn limit(mut self, n: u64) -> Self {
        self.sql.push_str(&format!(" LIMIT {n}"));
        self
    }

    /// Appends `OFFSET n`.
    pub fn offset(mut self, n: u64) -> Self {
        self.sql.push_str(&format!(" OFFSET {n}"));
        self
    }

    /// Appends `GROUP BY a,b`.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`] when `columns` is empty or holds an empty
    /// name.
    pub fn group_by<S: AsRef<str>>(mut self, columns: &[S]) -> Result<Self> {
        if columns.is_empty() {
            return Err(SqlError::query("GROUP BY needs at least one column"));
        }
        if columns.iter().any(|c| c.as_ref().is_empty()) {
            return Err(SqlError::query("GROUP BY column name is empty"));
        }
        let columns: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
        self.sql.push_str(" GROUP BY ");
        self.sql.push_str(&columns.join(","));
        Ok(self)
    }
}

impl Statement for SelectQuery {
    fn as_sql(&self) -> &str {
        &self.sql
    }
}
