//! # lsw-client
//!
//! Blocking REST transport for cache documents.
//!
//! The backend exposes caches as CRUD resources under
//! `{scopedPartition}/{keyID}[/{cacheID}]` service paths. [`Client`] maps
//! each verb onto an HTTP request and also implements the app layer's
//! [`Transport`](lsw_app::Transport) seam, so an `lsw://` address can be
//! fetched straight into a [`CacheDocument`](lsw_cache::CacheDocument).
//!
//! ```ignore
//! use lsw_address::Address;
//! use lsw_client::Client;
//!
//! let client = Client::new("https://backend.example.com")?;
//!
//! // CRUD by coordinates
//! let doc = client.get("apps@PUBLIC", "a1b2c3", "landing-page")?;
//!
//! // Or straight from an address
//! let addr = Address::parse("lsw://apps/a1b2c3/landing-page")?;
//! let cache = client.fetch_document_by_address(&addr)?;
//! ```

mod error;
mod rest;

pub use error::ClientError;
pub use rest::Client;
