//! Clinical record store.
//!
//! `medrec-store` persists patients and their doctor interactions in a SQL
//! database, using statements built by `medrec-sql-core`:
//! - Table creation from a fixed [`SchemaRegistry`](registry::SchemaRegistry)
//! - Chunked batch inserts, one committed transaction per chunk
//! - CSV and JSON import
//! - Lookups by insurance number with label filters and paging
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use medrec_store::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let config = StoreConfig::new("sqlite:clinic.sqlite3").batch_size(250);
//! let executor = SqliteExecutor::connect(&config).await?;
//! let store = ClinicStore::new(executor, Arc::new(SchemaRegistry::clinical()?))
//!     .with_batch_size(config.batch_size)?;
//!
//! store.create_tables().await?;
//! let recent = store
//!     .interactions("INS-001", Some("followup,urgent"), Page::new(0, 20)?)
//!     .await?;
//! # let _ = recent;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod executor;
pub mod import;
pub mod models;
pub mod record;
pub mod registry;
pub mod repository;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::batch::{BatchReport, BatchWriter, DEFAULT_BATCH_SIZE};
    pub use crate::config::StoreConfig;
    pub use crate::error::{Result, StoreError};
    pub use crate::executor::{RowExecutor, SqliteExecutor};
    pub use crate::import::{load_records, read_csv};
    pub use crate::models::{Interaction, NextSteps, Patient};
    pub use crate::record::{record_to_row, Record};
    pub use crate::registry::{
        SchemaRegistry, INTERACTION_JSON_COLUMNS, INTERACTION_TABLE, PATIENT_JSON_COLUMNS,
        PATIENT_TABLE,
    };
    pub use crate::repository::{ClinicStore, Page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
}
