//! medrec CLI
//!
//! Command-line tool for creating, loading and querying the clinical store.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use medrec_sql_core::{Statement, StatementBuilder};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use medrec_store::prelude::*;

/// Clinical record store.
#[derive(Parser)]
#[command(name = "medrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:medrec.sqlite3")]
    database: String,

    /// Rows committed per chunk on import.
    #[arg(short, long, env = "MEDREC_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Maximum pooled connections.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE TABLE statements without connecting.
    Ddl {
        /// Only print this table.
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Create missing tables.
    Init,

    /// Load patients and interactions from CSV or JSON array files.
    Import {
        /// Patients file (`.csv` or JSON).
        #[arg(long)]
        patients: Option<PathBuf>,

        /// Interactions file (`.csv` or JSON), loaded after patients.
        #[arg(long)]
        interactions: Option<PathBuf>,
    },

    /// Record one interaction from a JSON object file.
    AddInteraction {
        /// Interaction file.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show a patient as JSON.
    Patient {
        /// Insurance number.
        insurance_no: String,
    },

    /// List a patient's interactions as JSON, newest first.
    Interactions {
        /// Insurance number.
        insurance_no: String,

        /// Comma-separated labels to match.
        #[arg(short, long)]
        labels: Option<String>,

        /// Rows to skip.
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Rows to return.
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = Arc::new(SchemaRegistry::clinical()?);

    if let Commands::Ddl { table } = &cli.command {
        print_ddl(&registry, table.as_deref())?;
        return Ok(());
    }

    let config = StoreConfig::new(cli.database)
        .batch_size(cli.batch_size)
        .max_connections(cli.max_connections);
    let executor = SqliteExecutor::connect(&config).await?;
    let store = ClinicStore::new(executor, Arc::clone(&registry))
        .with_batch_size(config.batch_size)?;

    match cli.command {
        Commands::Ddl { .. } => {}

        Commands::Init => {
            store.create_tables().await?;
            info!("Tables created.");
        }

        Commands::Import {
            patients,
            interactions,
        } => {
            store.create_tables().await?;
            if let Some(path) = patients {
                let records: Vec<Patient> =
                    load_records(&path, registry.patient(), PATIENT_JSON_COLUMNS)?;
                let report = store.insert_patients(&records).await?;
                info!("Imported {} patients in {} chunks", report.rows, report.chunks);
            }
            if let Some(path) = interactions {
                let records: Vec<Interaction> = load_records(
                    &path,
                    registry.interaction(),
                    INTERACTION_JSON_COLUMNS,
                )?;
                let report = store.insert_interactions(&records).await?;
                info!(
                    "Imported {} interactions in {} chunks",
                    report.rows, report.chunks
                );
            }
        }

        Commands::AddInteraction { file } => {
            let contents = std::fs::read_to_string(&file)?;
            let interaction: Interaction = serde_json::from_str(&contents)?;
            store.add_interaction(&interaction).await?;
            info!("Patient interaction {} created.", interaction.id);
        }

        Commands::Patient { insurance_no } => {
            let patient = store
                .patient_by_insurance_no(&insurance_no)
                .await?
                .ok_or(StoreError::PatientNotFound(insurance_no))?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }

        Commands::Interactions {
            insurance_no,
            labels,
            offset,
            limit,
        } => {
            let page = Page::new(offset, limit)?;
            let found = store
                .interactions(&insurance_no, labels.as_deref(), page)
                .await?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    store.executor().close().await;
    Ok(())
}

fn print_ddl(registry: &SchemaRegistry, table: Option<&str>) -> Result<()> {
    let builder = StatementBuilder::new();
    let schemas: Vec<_> = match table {
        Some(name) => vec![registry
            .get(name)
            .ok_or_else(|| StoreError::UnknownTable(name.to_string()))?],
        None => registry.iter().collect(),
    };
    for schema in schemas {
        println!("{}", builder.create(schema).construct_query());
    }
    Ok(())
}
