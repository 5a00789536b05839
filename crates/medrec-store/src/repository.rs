//! Patient and interaction storage.

use std::sync::Arc;

use medrec_sql_core::{Column, Condition, Direction, Statement, StatementBuilder, TableSchema};
use tracing::{info, warn};

use crate::batch::{BatchReport, BatchWriter, DEFAULT_BATCH_SIZE};
use crate::error::{Result, StoreError};
use crate::executor::RowExecutor;
use crate::models::{Interaction, Patient};
use crate::record::record_to_row;
use crate::registry::SchemaRegistry;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u64 = 100;
/// Page size when none is given.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// A window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u64,
    limit: u64,
}

impl Page {
    /// Creates a page. `limit` must be between 1 and [`MAX_PAGE_LIMIT`].
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidPage`] when `limit` is out of bounds.
    pub fn new(offset: u64, limit: u64) -> Result<Self> {
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(StoreError::InvalidPage(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }
        Ok(Self { offset, limit })
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Reads and writes clinical records through a [`RowExecutor`].
#[derive(Debug, Clone)]
pub struct ClinicStore<E> {
    executor: E,
    registry: Arc<SchemaRegistry>,
    batch_size: usize,
}

impl<E: RowExecutor> ClinicStore<E> {
    /// Creates a store with the default batch size.
    pub const fn new(executor: E, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            executor,
            registry,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the rows committed per chunk on insert.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidBatchSize`] when `batch_size` is zero.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(StoreError::InvalidBatchSize(batch_size));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Creates every table that does not exist yet, patients first.
    ///
    /// # Errors
    ///
    /// Returns the first database error.
    pub async fn create_tables(&self) -> Result<()> {
        let builder = StatementBuilder::with_dialect(self.executor.dialect());
        for schema in self.registry.iter() {
            self.executor
                .execute(&builder.create(schema).construct_query())
                .await?;
            info!(table = schema.name(), "Ensured table");
        }
        Ok(())
    }

    /// Inserts patients in committed chunks.
    ///
    /// # Errors
    ///
    /// Stops at the first failed chunk; earlier chunks stay committed.
    pub async fn insert_patients(&self, patients: &[Patient]) -> Result<BatchReport> {
        self.insert_records(self.registry.patient(), patients).await
    }

    /// Inserts interactions in committed chunks.
    ///
    /// The referenced patients must already exist.
    ///
    /// # Errors
    ///
    /// Stops at the first failed chunk; earlier chunks stay committed.
    pub async fn insert_interactions(&self, interactions: &[Interaction]) -> Result<BatchReport> {
        self.insert_records(self.registry.interaction(), interactions)
            .await
    }

    /// Records one interaction after checking that its patient exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::PatientNotFound`] when no patient has the interaction's
    /// insurance number, or the database error of the insert.
    pub async fn add_interaction(&self, interaction: &Interaction) -> Result<()> {
        self.require_patient(&interaction.insurance_no).await?;
        self.insert_records(
            self.registry.interaction(),
            std::slice::from_ref(interaction),
        )
        .await?;
        info!(id = interaction.id, insurance_no = %interaction.insurance_no, "Added interaction");
        Ok(())
    }

    async fn insert_records<T: serde::Serialize>(
        &self,
        schema: &TableSchema,
        records: &[T],
    ) -> Result<BatchReport> {
        let json_columns = SchemaRegistry::json_columns(schema.name());
        let rows = records
            .iter()
            .map(|record| record_to_row(schema, json_columns, record))
            .collect::<Result<Vec<_>>>()?;
        let report = BatchWriter::new(&self.executor, self.batch_size)?
            .insert(schema.name(), &schema.column_names(), &rows)
            .await?;
        info!(
            table = schema.name(),
            rows = report.rows,
            chunks = report.chunks,
            "Inserted records"
        );
        Ok(report)
    }

    /// Looks up a patient by insurance number.
    ///
    /// # Errors
    ///
    /// Database errors, or a stored row that no longer decodes.
    pub async fn patient_by_insurance_no(&self, insurance_no: &str) -> Result<Option<Patient>> {
        let schema = self.registry.patient();
        let key = required_column(schema, "insurance_no")?;
        let sql = StatementBuilder::with_dialect(self.executor.dialect())
            .select(&["*"], schema.name())?
            .conditions(&[Condition::eq(key, insurance_no)], &[])?
            .limit(1)
            .construct_query();

        match self.executor.fetch_all(&sql).await?.into_iter().next() {
            Some(record) => Ok(Some(
                record.decode(SchemaRegistry::json_columns(schema.name()))?,
            )),
            None => {
                warn!(insurance_no, "Patient not found");
                Ok(None)
            }
        }
    }

    /// Lists a patient's interactions, newest first.
    ///
    /// `labels` is a comma-separated list; when non-empty only interactions
    /// carrying one of those labels are returned.
    ///
    /// # Errors
    ///
    /// [`StoreError::PatientNotFound`] when the insurance number is unknown.
    pub async fn interactions(
        &self,
        insurance_no: &str,
        labels: Option<&str>,
        page: Page,
    ) -> Result<Vec<Interaction>> {
        self.require_patient(insurance_no).await?;
        let schema = self.registry.interaction();
        let key = required_column(schema, "insurance_no")?;
        let label = required_column(schema, "label")?;

        let any: Vec<Condition> = labels
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| Condition::eq(label, l))
            .collect();

        let sql = StatementBuilder::with_dialect(self.executor.dialect())
            .select(&["*"], schema.name())?
            .conditions(&[Condition::eq(key, insurance_no)], &any)?
            .order_by("interaction_date", Direction::Desc)?
            .limit(page.limit())
            .offset(page.offset())
            .construct_query();

        let json_columns = SchemaRegistry::json_columns(schema.name());
        self.executor
            .fetch_all(&sql)
            .await?
            .into_iter()
            .map(|record| record.decode(json_columns))
            .collect()
    }

    async fn require_patient(&self, insurance_no: &str) -> Result<()> {
        if self.patient_by_insurance_no(insurance_no).await?.is_none() {
            return Err(StoreError::PatientNotFound(insurance_no.to_string()));
        }
        Ok(())
    }
}

fn required_column<'s>(schema: &'s TableSchema, name: &str) -> Result<&'s Column> {
    schema
        .column(name)
        .ok_or_else(|| StoreError::UnknownColumn(format!("{}.{name}", schema.name())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert_eq!(Page::default().limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(Page::default().offset(), 0);
        assert!(Page::new(5, 1).is_ok());
        assert!(Page::new(0, MAX_PAGE_LIMIT).is_ok());
        assert!(matches!(Page::new(0, 0), Err(StoreError::InvalidPage(_))));
        assert!(matches!(
            Page::new(0, MAX_PAGE_LIMIT + 1),
            Err(StoreError::InvalidPage(_))
        ));
    }
}
