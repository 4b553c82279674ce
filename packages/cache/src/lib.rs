//! Cache documents and leaf resolution.
//!
//! A cache document is a JSON tree rooted at a required `contents` member.
//! Leaves are addressed by slash-delimited paths (with an optional `#/`
//! prefix) and are either plain values or self-describing inline `data:`
//! URIs that decode into typed [`Blob`]s.
//!
//! # Example
//!
//! ```rust
//! use lsw_cache::{CacheDocument, Resolved};
//!
//! let doc = CacheDocument::from_json_str(
//!     r#"{"contents":{"a":{"b":"hello"}}}"#,
//! ).unwrap();
//!
//! assert_eq!(doc.resolve("#/a/b", true).unwrap(), Resolved::Text("hello".into()));
//! ```

pub use bytes::Bytes;

mod blob;
pub mod data_uri;
mod document;
mod error;

pub use blob::Blob;
pub use document::{CacheDocument, Resolved, CONTENTS_KEY, FRAGMENT_PREFIX};
pub use error::CacheError;
