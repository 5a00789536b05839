//! Immutable table descriptions.

use std::collections::HashMap;

use super::types::SqlType;
use crate::error::{Result, SqlError};

/// Anything a condition can be built against: a name and a declared type.
pub trait ColumnRef {
    /// The column name.
    fn name(&self) -> &str;

    /// The declared column type.
    fn dtype(&self) -> SqlType;
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    dtype: SqlType,
}

impl Column {
    /// Creates a column.
    #[must_use]
    pub fn new(name: impl Into<String>, dtype: SqlType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }

    /// Returns the column definition fragment, e.g. `age INT`.
    #[must_use]
    pub fn definition(&self) -> String {
        format!("{} {}", self.name, self.dtype.as_sql())
    }
}

impl ColumnRef for Column {
    fn name(&self) -> &str {
        &self.name
    }

    fn dtype(&self) -> SqlType {
        self.dtype
    }
}

impl<C: ColumnRef + ?Sized> ColumnRef for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dtype(&self) -> SqlType {
        (**self).dtype()
    }
}

/// Validated description of a table: name, ordered columns and free-form
/// constraint clauses.
///
/// A schema is a value object. Once built it is never mutated, so it can be
/// shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
    constraints: Vec<String>,
    index: HashMap<String, usize>,
}

impl TableSchema {
    /// Builds a schema, rejecting an empty or malformed name, an empty
    /// column list, and duplicate column names.
    ///
    /// # Errors
    ///
    /// [`SqlError::InvalidSchema`] when the name is empty or not an identifier,
    /// when there are no columns, or when a column name repeats.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        constraints: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SqlError::schema("table name is empty"));
        }
        if !is_identifier(&name) {
            return Err(SqlError::schema(format!(
                "table name '{name}' is not a valid identifier"
            )));
        }
        if columns.is_empty() {
            return Err(SqlError::schema(format!("table '{name}' has no columns")));
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if !is_identifier(column.name()) {
                return Err(SqlError::schema(format!(
                    "column name '{}' in table '{name}' is not a valid identifier",
                    column.name()
                )));
            }
            if index.insert(column.name().to_string(), position).is_some() {
                return Err(SqlError::schema(format!(
                    "duplicate column '{}' in table '{name}'",
                    column.name()
                )));
            }
        }

        Ok(Self {
            name,
            columns,
            constraints,
            index,
        })
    }

    /// Starts a fluent schema definition.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&position| &self.columns[position])
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Constraint clauses in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }
}

/// Fluent builder for [`TableSchema`]. Validation happens in [`build`].
///
/// [`build`]: TableSchemaBuilder::build
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    name: String,
    columns: Vec<Column>,
    constraints: Vec<String>,
}

impl TableSchemaBuilder {
    /// Appends a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, dtype: SqlType) -> Self {
        self.columns.push(Column::new(name, dtype));
        self
    }

    /// Appends a constraint clause, emitted verbatim.
    #[must_use]
    pub fn constraint(mut self, clause: impl Into<String>) -> Self {
        self.constraints.push(clause.into());
        self
    }

    /// Validates and returns the schema.
    ///
    /// # Errors
    ///
    /// Same as [`TableSchema::new`].
    pub fn build(self) -> Result<TableSchema> {
        TableSchema::new(self.name, self.columns, self.constraints)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
