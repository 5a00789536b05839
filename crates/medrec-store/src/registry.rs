//! Schemas of the clinical entities.
//!
//! The registry is built once at startup and shared read-only, usually
//! behind an `Arc`.

use medrec_sql_core::schema::{foreign_key, primary_key};
use medrec_sql_core::{Result, SqlType, TableSchema};

/// Table holding [`Patient`](crate::models::Patient) rows.
pub const PATIENT_TABLE: &str = "PATIENT";
/// Table holding [`Interaction`](crate::models::Interaction) rows.
pub const INTERACTION_TABLE: &str = "INTERACTION";

/// `PATIENT` columns holding JSON text.
pub const PATIENT_JSON_COLUMNS: &[&str] = &["related_docs"];
/// `INTERACTION` columns holding JSON text.
pub const INTERACTION_JSON_COLUMNS: &[&str] = &["metrics", "next_steps"];

/// Every table the store manages, in dependency order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    patient: TableSchema,
    interaction: TableSchema,
}

impl SchemaRegistry {
    /// Builds the patient and interaction schemas.
    ///
    /// # Errors
    ///
    /// Only if a built-in schema is invalid.
    pub fn clinical() -> Result<Self> {
        let patient = TableSchema::builder(PATIENT_TABLE)
            .column("insurance_no", SqlType::Varchar)
            .column("fname", SqlType::Varchar)
            .column("lname", SqlType::Varchar)
            .column("addr", SqlType::Varchar)
            .column("age", SqlType::Int)
            .column("sex", SqlType::Varchar)
            .column("ph_no", SqlType::Varchar)
            .column("email", SqlType::Varchar)
            .column("related_docs", SqlType::Text)
            .column("habits", SqlType::Text)
            .column("pre_existing_conditions", SqlType::Text)
            .column("pre_existing_medications", SqlType::Text)
            .column("blood_type", SqlType::Varchar)
            .column("insurance_provider", SqlType::Varchar)
            .constraint(primary_key(&["insurance_no"]))
            .build()?;

        let interaction = TableSchema::builder(INTERACTION_TABLE)
            .column("id", SqlType::Int)
            .column("insurance_no", SqlType::Varchar)
            .column("ailment", SqlType::Varchar)
            .column("symptoms", SqlType::Varchar)
            .column("interaction_date", SqlType::Date)
            .column("metrics", SqlType::Varchar)
            .column("remarks", SqlType::Varchar)
            .column("health_status", SqlType::Int)
            .column("qa", SqlType::Text)
            .column("next_steps", SqlType::Varchar)
            .column("label", SqlType::Varchar)
            .constraint(primary_key(&["id"]))
            .constraint(foreign_key("insurance_no", PATIENT_TABLE, "insurance_no"))
            .build()?;

        Ok(Self {
            patient,
            interaction,
        })
    }

    /// The `PATIENT` schema.
    #[must_use]
    pub const fn patient(&self) -> &TableSchema {
        &self.patient
    }

    /// The `INTERACTION` schema.
    #[must_use]
    pub const fn interaction(&self) -> &TableSchema {
        &self.interaction
    }

    /// Looks up a schema by table name.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.iter().find(|schema| schema.name() == table)
    }

    /// Columns of `table` whose values are stored as JSON text.
    #[must_use]
    pub fn json_columns(table: &str) -> &'static [&'static str] {
        match table {
            PATIENT_TABLE => PATIENT_JSON_COLUMNS,
            INTERACTION_TABLE => INTERACTION_JSON_COLUMNS,
            _ => &[],
        }
    }

    /// Schemas in creation order: referenced tables first.
    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        [&self.patient, &self.interaction].into_iter()
    }
}
