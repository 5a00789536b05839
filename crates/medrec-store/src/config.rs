//! Store configuration.

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::error::{Result, StoreError};

/// Connection and batching settings.
///
/// The binary fills this from command-line flags with environment fallbacks;
/// library users construct it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database URL, e.g. `sqlite:medrec.sqlite3` or `sqlite::memory:`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Rows per committed chunk for batch inserts.
    pub batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: String::from("sqlite:medrec.sqlite3"),
            max_connections: 5,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl StoreConfig {
    /// Creates a config for `database_url` with default pool and batch sizes.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Sets the batch chunk size.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Checks the settings before a pool is opened.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidBatchSize`] when `batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(StoreError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database_url, "sqlite:medrec.sqlite3");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = StoreConfig::new("sqlite::memory:").batch_size(0);
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidBatchSize(0))
        ));
    }
}
