//! Error types for cache resolution and decoding.

/// Errors at the cache layer.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// An inline-data string does not have the `data:<mediatype>[;enc],<payload>` shape.
    #[error("invalid data URI: {message}")]
    Format { message: String },

    /// A base64 payload failed to decode.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The cache document is missing its `contents` member, or `contents` is
    /// not an object.
    #[error("invalid cache: {message}")]
    DataFormat { message: String },

    /// Path traversal hit a segment with no value underneath it.
    #[error("path not found: no value at segment '{segment}' of '{path}'")]
    PathNotFound { segment: String, path: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CacheError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        CacheError::Format {
            message: message.into(),
        }
    }

    pub(crate) fn data_format(message: impl Into<String>) -> Self {
        CacheError::DataFormat {
            message: message.into(),
        }
    }
}
