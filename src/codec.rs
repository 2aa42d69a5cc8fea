//! Document Codecs
//!
//! TigerStyle: One capability trait, three interchangeable encodings of the
//! same in-memory document.
//!
//! A store file holds the whole [`Document`] encoded by exactly one codec.
//! The codec is chosen when the backend is constructed and never changes for
//! the lifetime of that store instance.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Data Model
// =============================================================================

/// A schema-less record: field name to JSON value.
///
/// One field is reserved: [`crate::UUID_FIELD`] holds the record's identity,
/// a string unique within its table. All other fields are caller-defined.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The complete persisted state of one store: table name to ordered record
/// sequence. Record order is insertion order and survives encode/decode;
/// tables serialize in name order so output is diffable.
pub type Document = BTreeMap<String, Vec<Record>>;

// =============================================================================
// Codec Trait
// =============================================================================

/// Byte-encoding strategy for a [`Document`].
///
/// Round-trip law: for any document built from JSON-compatible values,
/// `decode(encode(d))` is structurally equal to `d`.
pub trait Codec: fmt::Debug + Send + Sync {
    /// File extension for stores written with this codec (no leading dot).
    fn extension(&self) -> &'static str;

    /// Encode the whole document to bytes.
    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes back into a document. The backend never hands a codec an
    /// empty payload; an absent file short-circuits to an empty document.
    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError>;
}

/// Codec failure (malformed persisted content, or an unencodable value).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =============================================================================
// Codec Implementations
// =============================================================================

/// Pretty-printed JSON (2-space indent), human-diffable. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec_pretty(doc)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// YAML block notation, for stores meant to be edited by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError> {
        let text = serde_yaml::to_string(doc)?;
        Ok(text.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }
}

/// Opaque byte blob with no pretty-printing guarantee.
///
/// Inherited naming mismatch from the original system: the payload is compact
/// JSON, not a true binary encoding. The `.bin` extension and contract are
/// kept for compatibility; only [`JsonCodec`] promises diffable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn extension(&self) -> &'static str {
        "bin"
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(doc)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

// =============================================================================
// Storage Kind
// =============================================================================

/// Selectable storage kinds, one per codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Pretty-printed JSON (default)
    Json,
    /// YAML block notation
    Yaml,
    /// Opaque blob (compact JSON under the hood)
    Binary,
}

impl StorageKind {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Binary => "binary",
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            "binary" => Some(Self::Binary),
            _ => None,
        }
    }

    /// Get all storage kinds in order.
    #[must_use]
    pub fn all() -> &'static [StorageKind] {
        &[Self::Json, Self::Yaml, Self::Binary]
    }

    /// Build the codec for this kind.
    #[must_use]
    pub fn codec(&self) -> Box<dyn Codec> {
        match self {
            Self::Json => Box::new(JsonCodec),
            Self::Yaml => Box::new(YamlCodec),
            Self::Binary => Box::new(BinaryCodec),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
