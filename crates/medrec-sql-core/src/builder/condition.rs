//! Typed filter conditions.
//!
//! A condition pairs a column (name and declared type) with an operator and
//! a literal. The declared type decides how the literal is written: text-like
//! columns get single quotes with embedded quotes doubled, integer columns
//! get a bare numeral. Table and column names are trusted identifiers
//! supplied by calling code and are emitted as-is.

use super::operator::{Combinator, Operator};
use super::value::{SqlValue, ToSqlValue};
use crate::error::{Result, SqlError};
use crate::schema::{Column, ColumnRef, SqlType};

/// A `(column, operator, value)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    column: Column,
    op: Operator,
    value: SqlValue,
}

impl Condition {
    /// Creates a condition against any column descriptor.
    #[must_use]
    pub fn new(column: impl ColumnRef, op: Operator, value: impl ToSqlValue) -> Self {
        Self {
            column: Column::new(column.name(), column.dtype()),
            op,
            value: value.to_sql_value(),
        }
    }

    /// `column = value`
    #[must_use]
    pub fn eq(column: impl ColumnRef, value: impl ToSqlValue) -> Self {
        Self::new(column, Operator::Eq, value)
    }

    /// `column >= value`
    #[must_use]
    pub fn gte(column: impl ColumnRef, value: impl ToSqlValue) -> Self {
        Self::new(column, Operator::Gte, value)
    }

    /// `column <= value`
    #[must_use]
    pub fn lte(column: impl ColumnRef, value: impl ToSqlValue) -> Self {
        Self::new(column, Operator::Lte, value)
    }

    /// `column IN (values)`
    #[must_use]
    pub fn is_in<T: ToSqlValue>(column: impl ColumnRef, values: Vec<T>) -> Self {
        Self::new(column, Operator::In, values)
    }

    /// `column LIKE pattern`
    #[must_use]
    pub fn like(column: impl ColumnRef, pattern: impl ToSqlValue) -> Self {
        Self::new(column, Operator::Like, pattern)
    }

    /// Renders ` table.column op value`, leading space included.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidQuery`] when the value does not fit the column type
    /// or the operator.
    pub fn render(&self, table: &str) -> Result<String> {
        let value = match (self.op, &self.value) {
            (Operator::In, SqlValue::List(items)) => {
                if items.is_empty() {
                    return Err(SqlError::query(format!(
                        "IN on '{}' needs at least one value",
                        self.column.name()
                    )));
                }
                let rendered = items
                    .iter()
                    .map(|item| self.literal(item))
                    .collect::<Result<Vec<_>>>()?;
                format!("({})", rendered.join(","))
            }
            (Operator::In, _) => {
                return Err(SqlError::query(format!(
                    "IN on '{}' needs a value list",
                    self.column.name()
                )));
            }
            (_, value) => self.literal(value)?,
        };
        Ok(format!(
            " {table}.{} {} {value}",
            self.column.name(),
            self.op.as_sql()
        ))
    }

    fn literal(&self, value: &SqlValue) -> Result<String> {
        render_literal(self.column.name(), self.column.dtype(), value)
    }
}

fn render_literal(column: &str, dtype: SqlType, value: &SqlValue) -> Result<String> {
    match value {
        SqlValue::Null => Ok(String::from("NULL")),
        SqlValue::List(_) => Err(SqlError::query(format!(
            "value list for '{column}' is only allowed with IN"
        ))),
        SqlValue::Int(n) if dtype.is_quoted() => Ok(format!("'{n}'")),
        SqlValue::Int(n) => Ok(n.to_string()),
        SqlValue::Text(s) if dtype.is_quoted() => Ok(format!("'{}'", s.replace('\'', "''"))),
        SqlValue::Text(s) => s.trim().parse::<i64>().map(|n| n.to_string()).map_err(|_| {
            SqlError::query(format!(
                "'{s}' is not an integer literal for {} column '{column}'",
                dtype.as_sql()
            ))
        }),
    }
}

/// Renders one group of conditions joined by `combinator`, or `None` when the
/// group is empty.
pub(crate) fn render_group(
    table: &str,
    conditions: &[Condition],
    combinator: Combinator,
) -> Result<Option<String>> {
    if conditions.is_empty() {
        return Ok(None);
    }
    let fragments = conditions
        .iter()
        .map(|condition| condition.render(table))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(fragments.join(combinator.separator())))
}
