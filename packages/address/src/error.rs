//! Error type for address parsing.

/// Errors produced while parsing an `lsw://` address string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The string does not start with the `lsw://` scheme.
    #[error("invalid scheme in '{address}': expected 'lsw://'")]
    Scheme { address: String },

    /// The part after the scheme does not have the
    /// `partition[@scope]/keyID/cacheID` shape.
    #[error("invalid address '{address}': {message}")]
    Shape {
        address: String,
        message: &'static str,
    },

    /// An identifier field contains characters outside its alphabet.
    #[error("invalid {field} '{value}': {message}")]
    Field {
        field: &'static str,
        value: String,
        message: &'static str,
    },

    /// A query pair is not of the form `key=value`.
    #[error("malformed query pair '{pair}': expected key=value")]
    QueryPair { pair: String },
}
