//! Flatstore CLI
//!
//! Thin command boundary over the record store. Every subcommand is one
//! store operation; `serve` exposes the same operations over HTTP.
//!
//! Storage kind resolution: `--storage` flag, else the `FLATSTORE_STORAGE`
//! environment variable, else json.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use flatstore::{
    api, FileBackend, Record, RecordStore, StorageKind, APP_NAME, APP_VERSION, DATA_DIR_DEFAULT,
    HTTP_BIND_ADDRESS_DEFAULT, STORAGE_ENV_VAR, STORE_NAME_DEFAULT,
};

// =============================================================================
// CLI
// =============================================================================

/// Minimal file-backed record store
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Minimal file-backed record store")]
#[command(version)]
struct Cli {
    /// Storage kind (json, yaml, binary); defaults to $FLATSTORE_STORAGE or json
    #[arg(short, long)]
    storage: Option<String>,

    /// Data directory holding store files
    #[arg(long, default_value = DATA_DIR_DEFAULT)]
    data_dir: String,

    /// Logical store name (file stem on disk)
    #[arg(long, default_value = STORE_NAME_DEFAULT)]
    store: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new table
    Create {
        /// Table name
        table: String,
    },
    /// Insert a record into a table (a fresh _uuid is assigned)
    Insert {
        /// Table name
        table: String,
        /// Record payload as a JSON object
        #[arg(default_value = "{}")]
        record: String,
    },
    /// Find a record by id
    Find {
        /// Table name
        table: String,
        /// Record id
        id: String,
    },
    /// Merge fields into an existing record
    Update {
        /// Table name
        table: String,
        /// Record id
        id: String,
        /// Partial record as a JSON object
        partial: String,
    },
    /// Delete a record by id
    Delete {
        /// Table name
        table: String,
        /// Record id
        id: String,
    },
    /// Delete a table and all its records
    Drop {
        /// Table name
        table: String,
    },
    /// List records in a table
    List {
        /// Table name
        table: String,
        /// Maximum number of records to print
        #[arg(long)]
        limit: Option<usize>,
        /// Offset into the table's insertion order
        #[arg(long)]
        skip: Option<usize>,
    },
    /// Serve the HTTP API
    Serve {
        /// HTTP bind address
        #[arg(short, long, default_value = HTTP_BIND_ADDRESS_DEFAULT)]
        bind: String,
    },
}

fn parse_record(payload: &str) -> anyhow::Result<Record> {
    serde_json::from_str(payload).context("payload must be a JSON object")
}

fn resolve_storage_kind(flag: Option<&str>) -> anyhow::Result<StorageKind> {
    let name = match flag {
        Some(name) => name.to_string(),
        None => std::env::var(STORAGE_ENV_VAR)
            .unwrap_or_else(|_| StorageKind::Json.as_str().to_string()),
    };
    StorageKind::from_str(&name).ok_or_else(|| {
        anyhow::anyhow!("unknown storage kind '{name}' (expected json, yaml or binary)")
    })
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .init();

    let kind = resolve_storage_kind(cli.storage.as_deref())?;
    let data_dir = shellexpand::tilde(&cli.data_dir).to_string();
    let store = RecordStore::new(FileBackend::new(data_dir, &cli.store, kind));
    tracing::debug!(path = %store.path().display(), storage = %kind, "store opened");

    match cli.command {
        Command::Create { table } => {
            store.create_table(&table)?;
            println!("Table '{table}' created.");
        }
        Command::Insert { table, record } => {
            let mut record = parse_record(&record)?;
            let id = api::assign_record_id(&mut record);
            store.insert_record(&table, record)?;
            println!("Record '{id}' inserted into '{table}'.");
        }
        Command::Find { table, id } => match store.record_by_id(&table, &id)? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&Value::Object(record))?),
            None => println!("No record with id '{id}' in table '{table}'."),
        },
        Command::Update { table, id, partial } => {
            store.update_record(&table, &id, parse_record(&partial)?)?;
            println!("Record '{id}' updated in '{table}'.");
        }
        Command::Delete { table, id } => {
            store.delete_record(&table, &id)?;
            println!("Record '{id}' deleted from '{table}'.");
        }
        Command::Drop { table } => {
            store.delete_table(&table)?;
            println!("Table '{table}' dropped.");
        }
        Command::List { table, limit, skip } => {
            let records = store.all_records(&table, limit, skip)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Serve { bind } => {
            tracing::info!("{APP_NAME} v{APP_VERSION}");
            tracing::info!(path = %store.path().display(), storage = %kind, "serving store");

            let addr: std::net::SocketAddr = bind.parse().context("invalid bind address")?;
            let app = api::router(Arc::new(store));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!("listening on {addr}");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
