//! Error types for statement construction and schema validation.

use thiserror::Error;

/// Errors raised while building statements or schemas.
///
/// Both variants signal caller misuse. Retrying with the same input
/// always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A statement could not be built from the given input.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A table schema failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl SqlError {
    pub(crate) fn query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, SqlError>;
