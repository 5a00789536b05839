//! Mapping between serde records and positional row tuples.
//!
//! Records are projected onto a schema's column order through their JSON
//! form. Columns listed as JSON columns hold nested values (lists, objects)
//! encoded as JSON text and are decoded back when rows are read; every other
//! column holds a plain scalar and is read back as-is.

use medrec_sql_core::{ColumnRef, SqlValue, TableSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// One fetched row: column names paired with values, in result order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, SqlValue)>,
}

impl Record {
    /// Creates a record from `(column, value)` pairs.
    #[must_use]
    pub const fn new(fields: Vec<(String, SqlValue)>) -> Self {
        Self { fields }
    }

    /// Returns the value of `column`, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Converts the record into a JSON object, parsing the text of
    /// `json_columns`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialization`] when a JSON column holds text that is
    /// not valid JSON.
    pub fn into_json(self, json_columns: &[&str]) -> Result<Map<String, Value>> {
        self.fields
            .into_iter()
            .map(|(name, value)| {
                let value = if json_columns.contains(&name.as_str()) {
                    json_from_sql(value)?
                } else {
                    scalar_from_sql(value)
                };
                Ok((name, value))
            })
            .collect()
    }

    /// Deserializes the record into `T`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialization`] when a JSON column is malformed or the
    /// row does not match `T`.
    pub fn decode<T: DeserializeOwned>(self, json_columns: &[&str]) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(
            self.into_json(json_columns)?,
        ))?)
    }
}

impl FromIterator<(String, SqlValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Projects `record` onto the columns of `schema`, in declaration order.
///
/// Fields missing from the record become `NULL`; fields the schema does not
/// know are ignored. Values of `json_columns` are stored as JSON text.
///
/// # Errors
///
/// [`StoreError::UnsupportedValue`] when the record is not a JSON object or
/// a plain column receives a list or object.
pub fn record_to_row<T: Serialize>(
    schema: &TableSchema,
    json_columns: &[&str],
    record: &T,
) -> Result<Vec<SqlValue>> {
    let Value::Object(mut fields) = serde_json::to_value(record)? else {
        return Err(StoreError::UnsupportedValue {
            column: schema.name().to_string(),
            reason: String::from("record does not serialize to an object"),
        });
    };
    schema
        .columns()
        .iter()
        .map(|column| {
            let value = fields.remove(column.name()).unwrap_or(Value::Null);
            if json_columns.contains(&column.name()) {
                Ok(json_to_sql(value))
            } else {
                scalar_to_sql(column.name(), value)
            }
        })
        .collect()
}

fn json_to_sql(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        value => SqlValue::Text(value.to_string()),
    }
}

fn scalar_to_sql(column: &str, value: Value) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Int(i64::from(b))),
        Value::Number(n) => Ok(n
            .as_i64()
            .map_or_else(|| SqlValue::Text(n.to_string()), SqlValue::Int)),
        Value::String(s) => Ok(SqlValue::Text(s)),
        Value::Array(_) | Value::Object(_) => Err(StoreError::UnsupportedValue {
            column: column.to_string(),
            reason: String::from("nested value in a plain column"),
        }),
    }
}

fn json_from_sql(value: SqlValue) -> Result<Value> {
    match value {
        SqlValue::Text(s) => Ok(serde_json::from_str(&s)?),
        other => Ok(scalar_from_sql(other)),
    }
}

fn scalar_from_sql(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Int(n) => Value::from(n),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::List(items) => Value::Array(items.into_iter().map(scalar_from_sql).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_sql_core::SqlType;
    use serde::Deserialize;

    const JSON_COLUMNS: &[&str] = &["tags"];

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Visit {
        id: i64,
        label: Option<String>,
        tags: Option<Vec<String>>,
    }

    fn schema() -> TableSchema {
        TableSchema::builder("VISIT")
            .column("id", SqlType::Int)
            .column("label", SqlType::Varchar)
            .column("tags", SqlType::Text)
            .column("extra", SqlType::Text)
            .build()
            .unwrap()
    }

    #[test]
    fn test_record_to_row_follows_schema_order() {
        let visit = Visit {
            id: 3,
            label: Some("Cough".into()),
            tags: Some(vec!["a".into(), "b".into()]),
        };
        let row = record_to_row(&schema(), JSON_COLUMNS, &visit).unwrap();
        assert_eq!(
            row,
            vec![
                SqlValue::Int(3),
                SqlValue::Text("Cough".into()),
                SqlValue::Text(r#"["a","b"]"#.into()),
                SqlValue::Null,
            ]
        );
    }

    #[test]
    fn test_decode_parses_json_columns() {
        let record: Record = vec![
            (String::from("id"), SqlValue::Int(3)),
            (String::from("label"), SqlValue::Null),
            (String::from("tags"), SqlValue::Text(r#"["x"]"#.into())),
        ]
        .into_iter()
        .collect();

        let visit: Visit = record.decode(JSON_COLUMNS).unwrap();
        assert_eq!(
            visit,
            Visit {
                id: 3,
                label: None,
                tags: Some(vec!["x".into()]),
            }
        );
    }

    #[test]
    fn test_json_looking_text_in_plain_column_round_trips() {
        let visit = Visit {
            id: 1,
            label: Some(String::from("[1]")),
            tags: None,
        };
        let row = record_to_row(&schema(), JSON_COLUMNS, &visit).unwrap();
        assert_eq!(row[1], SqlValue::Text("[1]".into()));

        let record: Record = ["id", "label", "tags", "extra"]
            .into_iter()
            .map(String::from)
            .zip(row)
            .collect();
        assert_eq!(record.decode::<Visit>(JSON_COLUMNS).unwrap(), visit);
    }

    #[test]
    fn test_malformed_json_column_rejected() {
        let record = Record::new(vec![(String::from("tags"), SqlValue::Text("[draft".into()))]);
        assert!(matches!(
            record.into_json(JSON_COLUMNS),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_nested_value_in_plain_column_rejected() {
        let row = record_to_row(&schema(), &[], &serde_json::json!({"id": 1, "label": [1]}));
        assert!(matches!(row, Err(StoreError::UnsupportedValue { ref column, .. }) if column == "label"));
    }

    #[test]
    fn test_non_object_record_rejected() {
        assert!(record_to_row(&schema(), JSON_COLUMNS, &42).is_err());
    }
}
