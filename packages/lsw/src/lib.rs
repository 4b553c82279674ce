//! lsw: address-resolved cache documents and the two-stage app boot.
//!
//! `lsw://` addresses name cache documents on a REST backend. A cache
//! document is a JSON tree whose leaves are resolved by slash paths and may
//! carry inline `data:` payloads; the reserved `#/main` leaf is the entry
//! document that boots the application.
//!
//! The layers, bottom up:
//!
//! - [`address`]: the address grammar and structured coordinates.
//! - [`cache`]: documents, path resolution and the data-URI codec.
//! - [`template`]: entry-document expansion with a closed expression
//!   language.
//! - [`app`]: the lifecycle state machine, resource handles and mount point.
//! - [`client`]: the blocking REST transport.
//!
//! ```rust
//! use lsw::app::{App, CacheSource};
//! use lsw::cache::CacheDocument;
//! use serde_json::json;
//!
//! let mut app = App::new();
//! let doc = CacheDocument::new(json!({"contents": {"main": "Hello ${1+1}"}}));
//! app.load_app_cache(CacheSource::Document(doc), None).unwrap();
//! assert!(app.is_booted());
//! ```

pub use lsw_address as address;
pub use lsw_app as app;
pub use lsw_cache as cache;
pub use lsw_client as client;
pub use lsw_template as template;
