//! App lifecycle and resource handles.
//!
//! [`App`] is the state machine that loads two cache documents (a system/app
//! cache plus an optional content cache), hands out resolved data and
//! per-path resource handles, and - once the app cache is loaded - boots by
//! expanding the `#/main` entry document and publishing it to a
//! [`MountPoint`].
//!
//! Remote fetching goes through the [`Transport`] seam, implemented by
//! `lsw-client`; the embedding surface goes through [`MountPoint`]. Both are
//! injectable, so the lifecycle is fully testable in memory.
//!
//! # Example
//!
//! ```rust
//! use lsw_app::{App, CacheSource};
//! use lsw_cache::CacheDocument;
//! use serde_json::json;
//!
//! let mut app = App::new();
//! let doc = CacheDocument::new(json!({"contents": {"main": "Hello ${1+1}"}}));
//! app.load_app_cache(CacheSource::Document(doc), None).unwrap();
//! assert!(app.is_booted());
//! ```

mod app;
mod error;
mod handle;
mod mount;
mod transport;

pub use app::{App, AppEvent, AppTrack, CacheSource, CacheTrack, ENTRY_MEDIA_TYPE, MAIN_PATH};
pub use error::AppError;
pub use handle::{Handle, HandleCache, HandleRegistry, DEFAULT_HANDLE_CAPACITY};
pub use mount::MountPoint;
pub use transport::{Transport, TransportError};
