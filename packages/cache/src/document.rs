//! Cache documents and slash-path resolution.

use serde_json::Value as JsonValue;

use crate::blob::Blob;
use crate::data_uri;
use crate::error::CacheError;

/// Required top-level member of every cache document.
pub const CONTENTS_KEY: &str = "contents";

/// Optional path prefix stripped before traversal.
pub const FRAGMENT_PREFIX: &str = "#/";

/// A JSON-like tree rooted at a required `contents` member.
///
/// The document itself is held as raw JSON; the `contents` shape is checked
/// on every resolution, so a malformed document fails at the first lookup
/// rather than at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheDocument(JsonValue);

/// A value resolved out of a cache document: either leaf text or a decoded
/// inline-data blob.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Text(String),
    Blob(Blob),
}

impl Resolved {
    /// The text form, if this resolved to text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resolved::Text(s) => Some(s),
            Resolved::Blob(_) => None,
        }
    }

    /// The blob form, if this resolved to a blob.
    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Resolved::Text(_) => None,
            Resolved::Blob(b) => Some(b),
        }
    }

    /// Convert into a blob, wrapping bare text in an untyped blob.
    pub fn into_blob(self) -> Blob {
        match self {
            Resolved::Text(s) => Blob::from_text(s),
            Resolved::Blob(b) => b,
        }
    }
}

impl CacheDocument {
    /// Wrap an already-materialized JSON value.
    pub fn new(value: JsonValue) -> Self {
        CacheDocument(value)
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CacheError> {
        Ok(CacheDocument(serde_json::from_str(json)?))
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Unwrap the underlying JSON value.
    pub fn into_value(self) -> JsonValue {
        self.0
    }

    /// Resolve a slash-delimited path to a leaf value.
    ///
    /// An optional leading `#/` is stripped; the rest is split on `/` and
    /// walked one segment at a time (objects by key, arrays by decimal
    /// index). Empty segments look up the literal empty-string key - they are
    /// not skipped. Non-string leaves serialize to compact JSON. When
    /// `decode` is set and the leaf text is an inline-data URI, it decodes to
    /// a [`Blob`].
    ///
    /// # Errors
    ///
    /// * [`CacheError::DataFormat`] - `contents` missing or not an object.
    /// * [`CacheError::PathNotFound`] - a segment with nothing underneath.
    /// * [`CacheError::Format`] / [`CacheError::Base64`] - the leaf claimed
    ///   to be inline data but failed to decode.
    pub fn resolve(&self, path: &str, decode: bool) -> Result<Resolved, CacheError> {
        let mut cursor = match self.0.get(CONTENTS_KEY) {
            Some(contents @ JsonValue::Object(_)) => contents,
            Some(_) => return Err(CacheError::data_format("'contents' is not an object")),
            None => return Err(CacheError::data_format("missing 'contents' member")),
        };

        let path = path.strip_prefix(FRAGMENT_PREFIX).unwrap_or(path);

        for segment in path.split('/') {
            let next = match cursor {
                JsonValue::Object(map) => map.get(segment),
                JsonValue::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            };
            cursor = next.ok_or_else(|| CacheError::PathNotFound {
                segment: segment.to_string(),
                path: path.to_string(),
            })?;
        }

        let text = match cursor {
            JsonValue::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };

        if decode && data_uri::is_data_uri(&text) {
            Ok(Resolved::Blob(data_uri::decode(&text)?))
        } else {
            Ok(Resolved::Text(text))
        }
    }
}

impl From<JsonValue> for CacheDocument {
    fn from(value: JsonValue) -> Self {
        CacheDocument::new(value)
    }
}
