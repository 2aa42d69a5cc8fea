//! Flatstore - Minimal File-Backed Record Store
//!
//! TigerStyle: Named tables hold ordered sequences of schema-less records.
//! The entire store is one document persisted as a single file; every
//! mutation is a full read-mutate-write cycle.
//!
//! Architecture, leaves first:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  RecordStore        │ table/record CRUD     │
//! ├─────────────────────────────────────────────┤
//! │  FileBackend        │ whole-document I/O    │
//! ├─────────────────────────────────────────────┤
//! │  Codec              │ json / yaml / binary  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Callers reach the store through two thin boundaries: a clap CLI
//! (`src/main.rs`) and an axum HTTP API (`src/api.rs`). Both assign record
//! identity before delegating; the store itself never mints a `_uuid`.

pub mod api;
pub mod backend;
pub mod codec;
pub mod error;
pub mod store;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Application name
pub const APP_NAME: &str = "flatstore";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP bind address for `flatstore serve`
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:8291";

/// Default data directory (tilde-expanded at startup)
pub const DATA_DIR_DEFAULT: &str = "~/.flatstore";

/// Default logical store name (becomes the file stem on disk)
pub const STORE_NAME_DEFAULT: &str = "data";

/// Environment variable selecting the default storage kind
pub const STORAGE_ENV_VAR: &str = "FLATSTORE_STORAGE";

/// Reserved record field holding the record's identity
pub const UUID_FIELD: &str = "_uuid";

// Re-export common types
pub use backend::FileBackend;
pub use codec::{BinaryCodec, Codec, CodecError, Document, JsonCodec, Record, StorageKind, YamlCodec};
pub use error::{StoreError, StoreResult};
pub use store::RecordStore;
