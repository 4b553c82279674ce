//! Error type for the app layer.

use lsw_address::AddressError;
use lsw_cache::CacheError;
use lsw_template::TemplateError;

use crate::transport::TransportError;

/// Errors surfaced by the app lifecycle and handle operations.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// An accessor was used before the corresponding load completed.
    #[error("{what} not loaded")]
    NotLoaded { what: &'static str },

    /// A load was given neither a usable address nor a document.
    #[error("invalid cache source: {message}")]
    InvalidInput { message: String },

    /// The transport failed to fetch an addressed document.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Resolution or decoding inside a cache document failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Entry-document expansion failed.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// An address string failed to parse.
    #[error("address error: {0}")]
    Address(#[from] AddressError),
}

impl AppError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
        }
    }
}
