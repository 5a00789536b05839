//! CREATE TABLE statements.

use super::Statement;
use crate::schema::{Column, TableSchema};

/// `CREATE TABLE IF NOT EXISTS` for a [`TableSchema`].
///
/// Column definitions are joined with `,`. Constraint clauses follow as
/// `, c1, c2`, verbatim and in order. A schema without constraints emits no
/// constraint segment at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CreateTable {
    sql: String,
}

impl CreateTable {
    pub(crate) fn new(schema: &TableSchema) -> Self {
        let columns: Vec<String> = schema.columns().iter().map(Column::definition).collect();
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({}",
            schema.name(),
            columns.join(",")
        );
        if !schema.constraints().is_empty() {
            sql.push_str(", ");
            sql.push_str(&schema.constraints().join(", "));
        }
        sql.push(')');
        Self { sql }
    }
}

impl Statement for CreateTable {
    fn as_sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;

    #[test]
    fn test_create_with_constraint() {
        let schema = TableSchema::builder("test_table")
            .column("id", SqlType::AutoIncrement)
            .column("name", SqlType::Varchar)
            .constraint("PRIMARY KEY (id)")
            .build()
            .unwrap();
        assert_eq!(
            CreateTable::new(&schema).construct_query(),
            "CREATE TABLE IF NOT EXISTS test_table (id INT AUTO_INCREMENT,name VARCHAR(255), PRIMARY KEY (id));"
        );
    }

    #[test]
    fn test_create_without_constraints_has_no_trailing_comma() {
        let schema = TableSchema::builder("notes")
            .column("body", SqlType::Text)
            .column("written", SqlType::Date)
            .build()
            .unwrap();
        assert_eq!(
            CreateTable::new(&schema).construct_query(),
            "CREATE TABLE IF NOT EXISTS notes (body TEXT,written DATE);"
        );
    }

    #[test]
    fn test_create_with_several_constraints() {
        let schema = TableSchema::builder("INTERACTION")
            .column("id", SqlType::Int)
            .column("insurance_no", SqlType::Varchar)
            .constraint("PRIMARY KEY (id)")
            .constraint("FOREIGN KEY (insurance_no) REFERENCES PATIENT(insurance_no)")
            .build()
            .unwrap();
        assert_eq!(
            CreateTable::new(&schema).as_sql(),
            "CREATE TABLE IF NOT EXISTS INTERACTION (id INT,insurance_no VARCHAR(255), \
             PRIMARY KEY (id), FOREIGN KEY (insurance_no) REFERENCES PATIENT(insurance_no))"
        );
    }
}
