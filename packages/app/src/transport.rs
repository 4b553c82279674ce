//! The remote transport seam.

use lsw_address::Address;
use lsw_cache::CacheDocument;

/// Failure reported by a [`Transport`] implementation.
///
/// Transports fold their own error types into a message here, keeping the
/// app layer free of transport dependencies.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
        }
    }
}

/// Fetches cache documents addressed by `lsw://` coordinates.
///
/// The app treats this as an opaque, possibly-blocking call; there is no
/// retry, timeout or cancellation at this layer.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn Transport`.
pub trait Transport {
    /// Fetch the document the address points at.
    fn fetch_document(&mut self, address: &Address) -> Result<CacheDocument, TransportError>;
}
