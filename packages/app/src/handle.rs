//! Resource handles and the per-path handle cache.

use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

use lsw_cache::{Blob, CacheDocument, CacheError};

/// Default capacity of a [`HandleCache`].
pub const DEFAULT_HANDLE_CAPACITY: usize = 256;

/// An opaque, process-local, revocable reference to byte content.
///
/// Handles are what the embedding surface navigates to. Identity is the
/// minted id - clones of a handle compare equal, distinct mints never do.
#[derive(Clone, Debug)]
pub struct Handle {
    id: Uuid,
    url: String,
    blob: Blob,
}

impl Handle {
    fn mint(blob: Blob) -> Self {
        let id = Uuid::new_v4();
        Handle {
            id,
            url: format!("blob:lsw/{}", id),
            blob,
        }
    }

    /// The handle's identity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The external URL form handed to the embedding surface.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The content the handle refers to.
    pub fn blob(&self) -> &Blob {
        &self.blob
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handle {}

/// Mints handles and tracks which are live.
///
/// The registry is the surface-facing allocator: [`resolve`](Self::resolve)
/// answers URL lookups until the handle is revoked.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    live: HashMap<String, Handle>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle for the blob.
    pub fn mint(&mut self, blob: Blob) -> Handle {
        let handle = Handle::mint(blob);
        self.live.insert(handle.url.clone(), handle.clone());
        handle
    }

    /// Revoke a handle; its URL stops resolving.
    pub fn revoke(&mut self, handle: &Handle) {
        self.live.remove(&handle.url);
    }

    /// Look a live handle up by URL.
    pub fn resolve(&self, url: &str) -> Option<&Handle> {
        self.live.get(url)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no handles are live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Memoizes one handle per resolved cache path.
///
/// The memo key is the path alone - not the document and not the decode
/// flag. That is only valid because a logical path is expected to address a
/// stable resource for the process lifetime; the cache documents the
/// constraint, it does not enforce it. The cache is capacity-bound: minting
/// past capacity revokes and evicts the oldest path's handle.
#[derive(Debug)]
pub struct HandleCache {
    registry: HandleRegistry,
    by_path: HashMap<String, Handle>,
    order: VecDeque<String>,
    capacity: usize,
}

impl HandleCache {
    /// Create a cache with [`DEFAULT_HANDLE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HANDLE_CAPACITY)
    }

    /// Create a cache bounded to `capacity` memoized handles.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "handle cache capacity must be positive");
        HandleCache {
            registry: HandleRegistry::new(),
            by_path: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Resolve a path in the document and return its memoized handle.
    ///
    /// Resolution runs on every call so errors surface consistently, but a
    /// memo hit returns the existing handle without minting a new one.
    pub fn handle_for(
        &mut self,
        document: &CacheDocument,
        path: &str,
        decode: bool,
    ) -> Result<Handle, CacheError> {
        let resolved = document.resolve(path, decode)?;

        if let Some(handle) = self.by_path.get(path) {
            return Ok(handle.clone());
        }

        if self.by_path.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                if let Some(evicted) = self.by_path.remove(&oldest) {
                    self.registry.revoke(&evicted);
                }
            }
        }

        let handle = self.registry.mint(resolved.into_blob());
        self.by_path.insert(path.to_string(), handle.clone());
        self.order.push_back(path.to_string());
        Ok(handle)
    }

    /// Mint a one-off handle that is never memoized (used for the ephemeral
    /// boot document).
    pub fn mint_ephemeral(&mut self, blob: Blob) -> Handle {
        self.registry.mint(blob)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    /// Number of memoized paths.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

impl Default for HandleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> CacheDocument {
        CacheDocument::new(json!({
            "contents": {
                "text": "hello",
                "icon": "data:text/plain;base64,aGVsbG8=",
                "a": "1", "b": "2", "c": "3",
            }
        }))
    }

    #[test]
    fn same_path_returns_identical_handle() {
        let mut cache = HandleCache::new();
        let d = doc();
        let first = cache.handle_for(&d, "text", true).unwrap();
        let second = cache.handle_for(&d, "text", true).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.url(), second.url());
        assert_eq!(cache.registry().len(), 1);
    }

    #[test]
    fn different_paths_get_distinct_handles() {
        let mut cache = HandleCache::new();
        let d = doc();
        let a = cache.handle_for(&d, "a", true).unwrap();
        let b = cache.handle_for(&d, "b", true).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.url(), b.url());
    }

    #[test]
    fn memo_key_is_path_not_document() {
        let mut cache = HandleCache::new();
        let first = cache.handle_for(&doc(), "text", true).unwrap();
        let other = CacheDocument::new(json!({"contents": {"text": "different"}}));
        let second = cache.handle_for(&other, "text", true).unwrap();
        // Documented simplification: same path, same handle, even across documents
        assert_eq!(first, second);
        assert_eq!(first.blob().as_text(), Some("hello"));
    }

    #[test]
    fn plain_text_is_wrapped_into_a_blob() {
        let mut cache = HandleCache::new();
        let h = cache.handle_for(&doc(), "text", true).unwrap();
        assert_eq!(h.blob().as_text(), Some("hello"));
        assert_eq!(h.blob().media_type(), "");
    }

    #[test]
    fn decoded_leaf_keeps_its_media_type() {
        let mut cache = HandleCache::new();
        let h = cache.handle_for(&doc(), "icon", true).unwrap();
        assert_eq!(h.blob().media_type(), "text/plain");
        assert_eq!(h.blob().bytes().as_ref(), b"hello");
    }

    #[test]
    fn resolution_errors_surface_on_every_call() {
        let mut cache = HandleCache::new();
        let d = doc();
        assert!(cache.handle_for(&d, "missing", true).is_err());
        assert!(cache.handle_for(&d, "missing", true).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_bound_evicts_and_revokes_oldest() {
        let mut cache = HandleCache::with_capacity(2);
        let d = doc();
        let a = cache.handle_for(&d, "a", true).unwrap();
        let b = cache.handle_for(&d, "b", true).unwrap();
        let c = cache.handle_for(&d, "c", true).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.registry().resolve(a.url()).is_none());
        assert!(cache.registry().resolve(b.url()).is_some());
        assert!(cache.registry().resolve(c.url()).is_some());

        // The evicted path gets a fresh handle on the next request
        let a2 = cache.handle_for(&d, "a", true).unwrap();
        assert_ne!(a, a2);
    }

    #[test]
    fn registry_resolves_until_revoked() {
        let mut registry = HandleRegistry::new();
        let h = registry.mint(Blob::from_text("x"));
        assert!(registry.resolve(h.url()).is_some());
        registry.revoke(&h);
        assert!(registry.resolve(h.url()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn ephemeral_handles_are_not_memoized() {
        let mut cache = HandleCache::new();
        let h1 = cache.mint_ephemeral(Blob::from_text("x"));
        let h2 = cache.mint_ephemeral(Blob::from_text("x"));
        assert_ne!(h1, h2);
        assert!(cache.is_empty());
        assert_eq!(cache.registry().len(), 2);
    }
}
