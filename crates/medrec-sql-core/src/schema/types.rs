//! Column types and constraint markers.

/// Logical SQL column types.
///
/// Each variant carries the literal SQL fragment emitted in `CREATE TABLE`.
/// The type also decides how condition literals are written: text-like types
/// are single-quoted, integer types are emitted as bare numerals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `VARCHAR(255)`.
    Varchar,
    /// `INT`.
    Int,
    /// `DATE`.
    Date,
    /// `TEXT`.
    Text,
    /// `INT AUTO_INCREMENT`.
    AutoIncrement,
}

impl SqlType {
    /// Returns the SQL type text used in column definitions.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Varchar => "VARCHAR(255)",
            Self::Int => "INT",
            Self::Date => "DATE",
            Self::Text => "TEXT",
            Self::AutoIncrement => "INT AUTO_INCREMENT",
        }
    }

    /// Returns whether literals compared against this type are quoted.
    #[must_use]
    pub const fn is_quoted(self) -> bool {
        match self {
            Self::Varchar | Self::Date | Self::Text => true,
            Self::Int | Self::AutoIncrement => false,
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Key markers that only ever appear inside table constraint clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `PRIMARY KEY`.
    PrimaryKey,
    /// `FOREIGN KEY`.
    ForeignKey,
}

impl ConstraintKind {
    /// Returns the SQL keyword pair.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::ForeignKey => "FOREIGN KEY",
        }
    }
}

/// Renders `PRIMARY KEY (a,b)`.
#[must_use]
pub fn primary_key(columns: &[&str]) -> String {
    format!("{} ({})", ConstraintKind::PrimaryKey.as_sql(), columns.join(","))
}

/// Renders `FOREIGN KEY (column) REFERENCES table(ref_column)`.
#[must_use]
pub fn foreign_key(column: &str, table: &str, ref_column: &str) -> String {
    format!(
        "{} ({column}) REFERENCES {table}({ref_column})",
        ConstraintKind::ForeignKey.as_sql()
    )
}
