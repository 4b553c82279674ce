//! lsw:// address grammar.
//!
//! An address names a cache document on a remote backend:
//!
//! ```text
//! lsw://partition[@scope]/keyID/cacheID[?k1=v1&k2=v2]
//! ```
//!
//! Parsing produces a structured [`Address`]; `Display` serializes it back to
//! its canonical string form. The scoped partition (`partition@scope`) plus
//! key ID and cache ID are the request coordinates used by the transport;
//! query parameters are resolution-time hints and never part of the
//! coordinates.
//!
//! # Example
//!
//! ```rust
//! use lsw_address::Address;
//!
//! let addr = Address::parse("lsw://apps@PUBLIC/a1b2c3/landing-page").unwrap();
//! assert_eq!(addr.partition(), "apps");
//! assert_eq!(addr.scoped_partition(), "apps@PUBLIC");
//! ```

mod address;
mod error;
mod query;

pub use address::{Address, DEFAULT_SCOPE, SCHEME};
pub use error::AddressError;
pub use query::parse_query;
