//! Persistence Backend
//!
//! TigerStyle: One store, one file, whole-document reads and writes.
//!
//! [`FileBackend`] owns a single resolved path (data directory + store name +
//! codec extension) and a codec fixed at construction. Reading a store that
//! was never written yields an empty document; malformed content is a hard
//! error, never silently replaced.
//!
//! Writes overwrite the file in place with no temp-file/rename staging: a
//! crash mid-write can leave a truncated file. Accepted by scope; the
//! truncation case is covered by tests rather than papered over.

use std::path::{Path, PathBuf};

use crate::codec::{Codec, Document, StorageKind};
use crate::error::{StoreError, StoreResult};

/// File-bound persistence backend performing whole-document I/O.
#[derive(Debug)]
pub struct FileBackend {
    /// Resolved store file path, fixed at construction
    path: PathBuf,
    /// Encoding strategy, fixed at construction
    codec: Box<dyn Codec>,
}

impl FileBackend {
    /// Create a backend for `store_name` under `data_dir` using the codec
    /// selected by `kind`. Resolves to `data_dir/store_name.<ext>`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, store_name: &str, kind: StorageKind) -> Self {
        let codec = kind.codec();
        let mut path = data_dir.into();
        path.push(format!("{store_name}.{}", codec.extension()));
        Self { path, codec }
    }

    /// The resolved store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document.
    ///
    /// An absent file is an empty store, not an error. Any other read
    /// failure, including content the codec cannot parse, is surfaced.
    pub fn read_data(&self) -> StoreResult<Document> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::new());
            }
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        self.codec.decode(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Encode the whole document and overwrite the store file.
    ///
    /// Creates the parent directory recursively on first write. Best-effort
    /// overwrite: not atomic at the filesystem level.
    pub fn write_data(&self, doc: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        let bytes = self.codec.encode(doc).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, bytes).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.insert(
            "users".to_string(),
            vec![json!({"_uuid": "u1", "name": "Alice"})
                .as_object()
                .unwrap()
                .clone()],
        );
        doc
    }

    #[test]
    fn test_read_missing_file_yields_empty_document() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path(), "never-written", StorageKind::Json);

        let doc = backend.read_data().unwrap();
        assert!(doc.is_empty());
        assert!(!backend.path().exists());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        for kind in StorageKind::all() {
            let backend = FileBackend::new(dir.path(), "data", *kind);
            let doc = sample_document();

            backend.write_data(&doc).unwrap();
            assert_eq!(backend.read_data().unwrap(), doc, "{kind}");
        }
    }

    #[test]
    fn test_path_carries_codec_extension() {
        let backend = FileBackend::new("/var/lib/flatstore", "data", StorageKind::Binary);
        assert_eq!(
            backend.path(),
            Path::new("/var/lib/flatstore/data.bin")
        );
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::new(&nested, "data", StorageKind::Json);

        backend.write_data(&sample_document()).unwrap();
        assert!(backend.path().exists());
    }

    #[test]
    fn test_overwrite_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path(), "data", StorageKind::Json);

        backend.write_data(&sample_document()).unwrap();
        backend.write_data(&Document::new()).unwrap();

        assert!(backend.read_data().unwrap().is_empty());
    }

    /// Simulates a crash mid-write: the store file is left truncated. The
    /// next read must surface a decode error instead of an empty store.
    #[test]
    fn test_truncated_file_surfaces_decode_error() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path(), "data", StorageKind::Json);
        backend.write_data(&sample_document()).unwrap();

        let bytes = std::fs::read(backend.path()).unwrap();
        std::fs::write(backend.path(), &bytes[..bytes.len() / 2]).unwrap();

        match backend.read_data() {
            Err(StoreError::Decode { path, .. }) => assert_eq!(path, backend.path()),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
