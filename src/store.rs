//! Record Store
//!
//! TigerStyle: Table lifecycle and record CRUD over one persistence backend.
//!
//! Every mutation is a full read-mutate-write cycle against the whole
//! document; pure reads read only. There is no locking and no transaction
//! boundary across operations: two concurrent mutations race and the last
//! writer wins. Acceptable for the small single-process stores this serves.
//!
//! Identity contract: records carry their id in the reserved
//! [`crate::UUID_FIELD`] field. The store matches on it but never mints,
//! checks, or overwrites it; the caller boundary (CLI or HTTP) assigns
//! identity before insert.

use serde_json::Value;

use crate::backend::FileBackend;
use crate::codec::{Document, Record};
use crate::error::{StoreError, StoreResult};
use crate::UUID_FIELD;

/// CRUD logic layer over a [`FileBackend`].
#[derive(Debug)]
pub struct RecordStore {
    backend: FileBackend,
}

/// Read the reserved identity field of a record, if present and a string.
fn record_id(record: &Record) -> Option<&str> {
    record.get(UUID_FIELD).and_then(Value::as_str)
}

impl RecordStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: FileBackend) -> Self {
        Self { backend }
    }

    /// The store file path (for logs and diagnostics).
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.backend.path()
    }

    /// Create an empty table. Fails with [`StoreError::AlreadyExists`] if the
    /// name is already taken.
    pub fn create_table(&self, table: &str) -> StoreResult<()> {
        let mut doc = self.backend.read_data()?;
        if doc.contains_key(table) {
            return Err(StoreError::AlreadyExists {
                table: table.to_string(),
            });
        }
        doc.insert(table.to_string(), Vec::new());
        self.backend.write_data(&doc)
    }

    /// Whether a table exists.
    pub fn table_exists(&self, table: &str) -> StoreResult<bool> {
        Ok(self.backend.read_data()?.contains_key(table))
    }

    /// Return the table's records in insertion order, offset by `skip`
    /// (default 0) and capped at `limit` (default: all remaining).
    ///
    /// Skip past the end yields an empty sequence; out-of-range values are
    /// not an error.
    pub fn all_records(
        &self,
        table: &str,
        limit: Option<usize>,
        skip: Option<usize>,
    ) -> StoreResult<Vec<Record>> {
        let doc = self.backend.read_data()?;
        let records = Self::table(&doc, table)?;

        let start = skip.unwrap_or(0).min(records.len());
        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(records.len()),
            None => records.len(),
        };
        Ok(records[start..end].to_vec())
    }

    /// Find a record by id via linear scan.
    ///
    /// A missing record in an existing table is a soft miss (`Ok(None)`),
    /// distinct from a missing table ([`StoreError::TableNotFound`]). Callers
    /// must preserve that distinction.
    pub fn record_by_id(&self, table: &str, id: &str) -> StoreResult<Option<Record>> {
        let doc = self.backend.read_data()?;
        let records = Self::table(&doc, table)?;
        Ok(records.iter().find(|r| record_id(r) == Some(id)).cloned())
    }

    /// Append a record to the table, as given. No identity or uniqueness
    /// check happens here; see the module docs for the identity contract.
    pub fn insert_record(&self, table: &str, record: Record) -> StoreResult<()> {
        let mut doc = self.backend.read_data()?;
        let records = Self::table_mut(&mut doc, table)?;
        records.push(record);
        self.backend.write_data(&doc)
    }

    /// Merge `partial`'s fields over the record with the given id, in place.
    ///
    /// Shallow field-by-field overwrite: fields absent from `partial` keep
    /// their stored values, and `_uuid` only changes if `partial` explicitly
    /// carries it.
    pub fn update_record(&self, table: &str, id: &str, partial: Record) -> StoreResult<()> {
        let mut doc = self.backend.read_data()?;
        let records = Self::table_mut(&mut doc, table)?;

        let record = records
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| StoreError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        for (field, value) in partial {
            record.insert(field, value);
        }
        self.backend.write_data(&doc)
    }

    /// Delete the record with the given id. Idempotent: a missing id is not
    /// an error, only a missing table is.
    pub fn delete_record(&self, table: &str, id: &str) -> StoreResult<()> {
        let mut doc = self.backend.read_data()?;
        let records = Self::table_mut(&mut doc, table)?;
        records.retain(|r| record_id(r) != Some(id));
        self.backend.write_data(&doc)
    }

    /// Delete a table and all its records permanently.
    pub fn delete_table(&self, table: &str) -> StoreResult<()> {
        let mut doc = self.backend.read_data()?;
        if doc.remove(table).is_none() {
            return Err(StoreError::TableNotFound {
                table: table.to_string(),
            });
        }
        self.backend.write_data(&doc)
    }

    fn table<'a>(doc: &'a Document, table: &str) -> StoreResult<&'a Vec<Record>> {
        doc.get(table).ok_or_else(|| StoreError::TableNotFound {
            table: table.to_string(),
        })
    }

    fn table_mut<'a>(doc: &'a mut Document, table: &str) -> StoreResult<&'a mut Vec<Record>> {
        doc.get_mut(table).ok_or_else(|| StoreError::TableNotFound {
            table: table.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
