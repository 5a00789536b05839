//! Chunked batch inserts.
//!
//! Rows are split into chunks of at most `chunk_size` and each chunk is
//! committed in its own transaction, in input order. A failed chunk stops the
//! run: earlier chunks stay committed and later ones are never sent.

use medrec_sql_core::{SqlValue, StatementBuilder};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::executor::RowExecutor;

/// Rows per chunk when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Outcome of a completed batch insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Rows written.
    pub rows: usize,
    /// Chunks committed.
    pub chunks: usize,
}

/// Writes rows through a [`RowExecutor`] in committed chunks.
#[derive(Debug)]
pub struct BatchWriter<'a, E> {
    executor: &'a E,
    chunk_size: usize,
}

impl<'a, E: RowExecutor> BatchWriter<'a, E> {
    /// Creates a writer. `chunk_size` must be at least 1.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidBatchSize`] when `chunk_size` is zero.
    pub fn new(executor: &'a E, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(StoreError::InvalidBatchSize(chunk_size));
        }
        Ok(Self {
            executor,
            chunk_size,
        })
    }

    /// Inserts `rows` into `table`.
    ///
    /// Every row is checked against the column count before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// Fails on the first row with the wrong arity, before anything is written,
    /// or on the first chunk the executor rejects.
    pub async fn insert<S: AsRef<str>>(
        &self,
        table: &str,
        columns: &[S],
        rows: &[Vec<SqlValue>],
    ) -> Result<BatchReport> {
        if rows.is_empty() {
            debug!(table, "No rows to insert");
            return Ok(BatchReport::default());
        }

        let insert = StatementBuilder::with_dialect(self.executor.dialect())
            .insert_batch(table, columns)?;
        for row in rows {
            insert.check_row(row)?;
        }

        let mut report = BatchReport::default();
        for (index, chunk) in rows.chunks(self.chunk_size).enumerate() {
            self.executor.execute_chunk(&insert, chunk).await?;
            report.rows += chunk.len();
            report.chunks += 1;
            info!(table, chunk = index + 1, rows = chunk.len(), "Committed batch chunk");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use medrec_sql_core::{GenericDialect, InsertBatch, SqlError};
    use std::sync::Mutex;

    /// Records chunk sizes and fails on a chosen chunk.
    #[derive(Default)]
    struct RecordingExecutor {
        chunks: Mutex<Vec<usize>>,
        fail_on: Option<usize>,
    }

    impl RowExecutor for RecordingExecutor {
        type Dialect = GenericDialect;

        fn dialect(&self) -> GenericDialect {
            GenericDialect::new()
        }

        async fn execute(&self, _sql: &str) -> Result<u64> {
            Ok(0)
        }

        async fn execute_chunk(&self, _insert: &InsertBatch, rows: &[Vec<SqlValue>]) -> Result<u64> {
            let mut chunks = self.chunks.lock().unwrap();
            if self.fail_on == Some(chunks.len()) {
                return Err(SqlError::InvalidQuery("boom".into()).into());
            }
            chunks.push(rows.len());
            Ok(rows.len() as u64)
        }

        async fn fetch_all(&self, _sql: &str) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }
    }

    fn rows(n: usize) -> Vec<Vec<SqlValue>> {
        (0..n)
            .map(|i| vec![SqlValue::Int(i64::try_from(i).unwrap()), SqlValue::Text(format!("row {i}"))])
            .collect()
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let executor = RecordingExecutor::default();
        assert!(matches!(
            BatchWriter::new(&executor, 0),
            Err(StoreError::InvalidBatchSize(0))
        ));
    }

    #[tokio::test]
    async fn test_chunks_in_order() {
        let executor = RecordingExecutor::default();
        let writer = BatchWriter::new(&executor, 100).unwrap();

        let report = writer.insert("t", &["a", "b"], &rows(250)).await.unwrap();
        assert_eq!(report, BatchReport { rows: 250, chunks: 3 });
        assert_eq!(*executor.chunks.lock().unwrap(), [100, 100, 50]);
    }

    #[tokio::test]
    async fn test_exact_multiple() {
        let executor = RecordingExecutor::default();
        let writer = BatchWriter::new(&executor, 50).unwrap();

        let report = writer.insert("t", &["a", "b"], &rows(100)).await.unwrap();
        assert_eq!(report.chunks, 2);
        assert_eq!(*executor.chunks.lock().unwrap(), [50, 50]);
    }

    #[tokio::test]
    async fn test_empty_rows_sends_nothing() {
        let executor = RecordingExecutor::default();
        let writer = BatchWriter::new(&executor, 10).unwrap();

        let report = writer.insert("t", &["a"], &[]).await.unwrap();
        assert_eq!(report, BatchReport::default());
        assert!(executor.chunks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_arity_checked_before_writing() {
        let executor = RecordingExecutor::default();
        let writer = BatchWriter::new(&executor, 1).unwrap();

        let mut data = rows(3);
        data[2].pop();
        let err = writer.insert("t", &["a", "b"], &data).await.unwrap_err();
        assert!(matches!(err, StoreError::Statement(SqlError::InvalidQuery(_))));
        assert!(executor.chunks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_stops_later_chunks() {
        let executor = RecordingExecutor {
            fail_on: Some(1),
            ..RecordingExecutor::default()
        };
        let writer = BatchWriter::new(&executor, 2).unwrap();

        assert!(writer.insert("t", &["a", "b"], &rows(6)).await.is_err());
        assert_eq!(*executor.chunks.lock().unwrap(), [2]);
    }
}
