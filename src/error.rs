//! Store Error Taxonomy
//!
//! TigerStyle: Every failure names the table, record, or path it concerns.
//! Nothing is recovered locally; the CLI and HTTP boundaries decide how a
//! failure is rendered.

use std::path::PathBuf;

use crate::codec::CodecError;

/// Errors surfaced by the backend and the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("table {table} already exists")]
    AlreadyExists { table: String },

    #[error("table {table} not found")]
    TableNotFound { table: String },

    #[error("record {id} not found in table {table}")]
    RecordNotFound { table: String, id: String },

    #[error("store file {path} cannot be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("storage i/o failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
