//! The app lifecycle state machine.

use lsw_address::Address;
use lsw_cache::{Blob, CacheDocument, Resolved};
use lsw_template::{expand, Scope, TemplateError, Value};

use crate::error::AppError;
use crate::handle::{Handle, HandleCache};
use crate::mount::MountPoint;
use crate::transport::Transport;

/// Reserved cache path of the entry document.
pub const MAIN_PATH: &str = "#/main";

/// Media type of the expanded entry document.
pub const ENTRY_MEDIA_TYPE: &str = "text/html";

/// States of the content-cache track. Ordered: transitions only advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheTrack {
    Idle,
    Loading,
    Loaded,
}

/// States of the app-cache track, ordered like [`CacheTrack`]. Reaching
/// `Loaded` triggers boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AppTrack {
    Idle,
    Loading,
    Loaded,
    Booting,
    Booted,
}

/// Lifecycle events, emitted to registered listeners in the order the
/// transitions happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    CacheLoad,
    CacheLoaded,
    AppCacheLoad,
    AppCacheLoaded,
    Boot,
    Booted,
}

/// What a load operation is given: an address to fetch through the
/// transport, or an already-materialized document.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheSource {
    Address(Address),
    Document(CacheDocument),
}

impl CacheSource {
    /// Classify a loose JSON value: strings are addresses, objects are
    /// documents, anything else is invalid input.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AppError> {
        match value {
            serde_json::Value::String(s) => Ok(CacheSource::Address(Address::parse(&s)?)),
            object @ serde_json::Value::Object(_) => {
                Ok(CacheSource::Document(CacheDocument::new(object)))
            }
            other => Err(AppError::invalid_input(format!(
                "expected an address string or a document object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Address> for CacheSource {
    fn from(address: Address) -> Self {
        CacheSource::Address(address)
    }
}

impl From<CacheDocument> for CacheSource {
    fn from(document: CacheDocument) -> Self {
        CacheSource::Document(document)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

type Listener = Box<dyn FnMut(AppEvent)>;

/// The lifecycle controller.
///
/// Owns the two cache documents, the handle cache and the mount point, and
/// walks the two monotonic tracks. Boot happens synchronously the first time
/// the app cache finishes loading, and at most once per `App` - a later
/// reload replaces the document without re-booting.
///
/// Everything here is single-threaded: loads block while the transport
/// fetches, and nothing is re-entrant.
pub struct App {
    cache: Option<CacheDocument>,
    app_cache: Option<CacheDocument>,
    cache_track: CacheTrack,
    app_track: AppTrack,
    boot_attempted: bool,
    handles: HandleCache,
    mount: Option<Box<dyn MountPoint>>,
    listeners: Vec<Listener>,
}

impl App {
    /// Create an idle app with no mount point.
    pub fn new() -> Self {
        App {
            cache: None,
            app_cache: None,
            cache_track: CacheTrack::Idle,
            app_track: AppTrack::Idle,
            boot_attempted: false,
            handles: HandleCache::new(),
            mount: None,
            listeners: Vec::new(),
        }
    }

    /// Create an idle app that publishes boot output to `mount`.
    pub fn with_mount(mount: impl MountPoint + 'static) -> Self {
        let mut app = Self::new();
        app.mount = Some(Box::new(mount));
        app
    }

    /// Install or replace the mount point.
    pub fn set_mount(&mut self, mount: impl MountPoint + 'static) {
        self.mount = Some(Box::new(mount));
    }

    /// Register a lifecycle listener.
    pub fn on_event(&mut self, listener: impl FnMut(AppEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current state of the content-cache track.
    pub fn cache_track(&self) -> CacheTrack {
        self.cache_track
    }

    /// Current state of the app-cache track.
    pub fn app_track(&self) -> AppTrack {
        self.app_track
    }

    /// Whether the content cache finished loading.
    pub fn is_cache_loaded(&self) -> bool {
        self.cache_track == CacheTrack::Loaded
    }

    /// Whether the app cache finished loading. Stays true through boot,
    /// including after a failed boot.
    pub fn is_app_cache_loaded(&self) -> bool {
        matches!(
            self.app_track,
            AppTrack::Loaded | AppTrack::Booting | AppTrack::Booted
        )
    }

    /// Whether boot completed.
    pub fn is_booted(&self) -> bool {
        self.app_track == AppTrack::Booted
    }

    /// The content cache document.
    pub fn cache(&self) -> Result<&CacheDocument, AppError> {
        self.cache.as_ref().ok_or(AppError::NotLoaded { what: "cache" })
    }

    /// The app cache document.
    pub fn app_cache(&self) -> Result<&CacheDocument, AppError> {
        self.app_cache
            .as_ref()
            .ok_or(AppError::NotLoaded { what: "app cache" })
    }

    /// The handle cache (registry lookups for the embedding surface).
    pub fn handles(&self) -> &HandleCache {
        &self.handles
    }

    /// Load the content cache. Independent of boot.
    pub fn load_cache(
        &mut self,
        source: CacheSource,
        transport: Option<&mut dyn Transport>,
    ) -> Result<(), AppError> {
        self.emit(AppEvent::CacheLoad);
        self.cache_track = self.cache_track.max(CacheTrack::Loading);
        log::debug!("loading content cache");

        self.cache = Some(materialize(source, transport)?);
        self.cache_track = self.cache_track.max(CacheTrack::Loaded);
        self.emit(AppEvent::CacheLoaded);
        Ok(())
    }

    /// Load the app cache and, the first time it completes, boot.
    ///
    /// Boot runs synchronously before this returns. A boot failure
    /// propagates but leaves the app cache loaded.
    pub fn load_app_cache(
        &mut self,
        source: CacheSource,
        transport: Option<&mut dyn Transport>,
    ) -> Result<(), AppError> {
        self.emit(AppEvent::AppCacheLoad);
        self.app_track = self.app_track.max(AppTrack::Loading);
        log::debug!("loading app cache");

        self.app_cache = Some(materialize(source, transport)?);
        self.app_track = self.app_track.max(AppTrack::Loaded);
        self.emit(AppEvent::AppCacheLoaded);

        // Single-attempt latch: a repeated load never re-runs boot.
        if !self.boot_attempted {
            self.boot()?;
        }
        Ok(())
    }

    /// Resolve a path in the content cache.
    pub fn cache_data(&self, path: &str, decode: bool) -> Result<Resolved, AppError> {
        Ok(self.cache()?.resolve(path, decode)?)
    }

    /// Resolve a path in the content cache to a memoized handle.
    pub fn cache_url(&mut self, path: &str, decode: bool) -> Result<Handle, AppError> {
        let document = self.cache.as_ref().ok_or(AppError::NotLoaded { what: "cache" })?;
        Ok(self.handles.handle_for(document, path, decode)?)
    }

    /// Resolve a path in the app cache.
    pub fn app_cache_data(&self, path: &str, decode: bool) -> Result<Resolved, AppError> {
        Ok(self.app_cache()?.resolve(path, decode)?)
    }

    /// Resolve a path in the app cache to a memoized handle.
    pub fn app_cache_url(&mut self, path: &str, decode: bool) -> Result<Handle, AppError> {
        let document = self
            .app_cache
            .as_ref()
            .ok_or(AppError::NotLoaded { what: "app cache" })?;
        Ok(self.handles.handle_for(document, path, decode)?)
    }

    fn boot(&mut self) -> Result<(), AppError> {
        self.boot_attempted = true;
        self.app_track = AppTrack::Booting;
        self.emit(AppEvent::Boot);

        let result = self.boot_inner();
        if let Err(ref error) = result {
            log::error!("boot failed: {}", error);
        }
        result
    }

    fn boot_inner(&mut self) -> Result<(), AppError> {
        // The entry document is resolved undecoded so it is always text.
        let main = match self.app_cache_data(MAIN_PATH, false)? {
            Resolved::Text(text) => text,
            Resolved::Blob(_) => unreachable!("undecoded resolution always yields text"),
        };

        let expanded = {
            let mut scope = BootScope { app: self };
            expand(&main, &mut scope)?
        };

        let blob = Blob::new(ENTRY_MEDIA_TYPE, expanded.into_bytes());
        // The whole document is ephemeral, so its handle is never memoized.
        let handle = self.handles.mint_ephemeral(blob);
        log::debug!("booted entry document at {}", handle.url());

        if let Some(mount) = self.mount.as_mut() {
            mount.navigate(handle);
        }

        self.app_track = AppTrack::Booted;
        self.emit(AppEvent::Booted);
        Ok(())
    }

    fn emit(&mut self, event: AppEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn materialize(
    source: CacheSource,
    transport: Option<&mut dyn Transport>,
) -> Result<CacheDocument, AppError> {
    match source {
        CacheSource::Document(document) => Ok(document),
        CacheSource::Address(address) => {
            let transport = transport
                .ok_or_else(|| AppError::invalid_input("an address source requires a transport"))?;
            Ok(transport.fetch_document(&address)?)
        }
    }
}

/// Binding scope the entry document is expanded against.
///
/// Exposes the app's resolution API as callables, each taking one path
/// string: `cacheData`, `cacheUrl`, `appCacheData`, `appCacheUrl`.
struct BootScope<'a> {
    app: &'a mut App,
}

impl BootScope<'_> {
    fn path_argument(name: &str, args: &[Value]) -> Result<String, TemplateError> {
        match args {
            [Value::Str(path)] => Ok(path.clone()),
            _ => Err(TemplateError::Call {
                name: name.to_string(),
                message: "expected exactly one path string argument".to_string(),
            }),
        }
    }

    fn text_of(resolved: Resolved) -> String {
        match resolved {
            Resolved::Text(text) => text,
            Resolved::Blob(_) => unreachable!("undecoded resolution always yields text"),
        }
    }
}

impl Scope for BootScope<'_> {
    fn lookup(&mut self, name: &str) -> Result<Value, TemplateError> {
        Err(TemplateError::UnknownIdentifier {
            name: name.to_string(),
        })
    }

    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, TemplateError> {
        let path = Self::path_argument(name, &args)?;
        let text = match name {
            "cacheData" => self
                .app
                .cache_data(&path, false)
                .map(Self::text_of)
                .map_err(|e| TemplateError::call_failed(name, e))?,
            "appCacheData" => self
                .app
                .app_cache_data(&path, false)
                .map(Self::text_of)
                .map_err(|e| TemplateError::call_failed(name, e))?,
            "cacheUrl" => self
                .app
                .cache_url(&path, true)
                .map(|h| h.url().to_string())
                .map_err(|e| TemplateError::call_failed(name, e))?,
            "appCacheUrl" => self
                .app
                .app_cache_url(&path, true)
                .map(|h| h.url().to_string())
                .map_err(|e| TemplateError::call_failed(name, e))?,
            _ => {
                return Err(TemplateError::UnknownFunction {
                    name: name.to_string(),
                })
            }
        };
        Ok(Value::Str(text))
    }
}
