//! Error types for the record store.

use medrec_sql_core::SqlError;

/// Errors that can occur while reading or writing records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A statement could not be built.
    #[error(transparent)]
    Statement(#[from] SqlError),

    /// Database error during execution.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Record (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (reading import files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV cell that does not fit its column.
    #[error("Invalid value on line {line} for column '{column}': {reason}")]
    InvalidCell {
        /// 1-based line in the input.
        line: u64,
        /// Column header.
        column: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No patient is registered under the insurance number.
    #[error("Patient record does not exist: {0}")]
    PatientNotFound(String),

    /// Chunk size must be at least one row.
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    /// Pagination outside the accepted bounds.
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    /// A value that the driver cannot bind.
    #[error("Unsupported value for column '{column}': {reason}")]
    UnsupportedValue {
        /// Column the value was meant for.
        column: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A registered table was not found.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A column the store relies on is missing from its schema.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
