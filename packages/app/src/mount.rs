//! The embedding-surface seam.

use crate::handle::Handle;

/// A mount point accepting a navigable handle.
///
/// The embedding surface (an iframe-like container, a preview pane, a test
/// recorder) receives the handle for the expanded entry document and is
/// responsible for actually displaying and isolating it.
///
/// # Object Safety
///
/// This trait is object-safe: the app holds a `Box<dyn MountPoint>`.
pub trait MountPoint {
    /// Make the handle the surface's navigation target.
    fn navigate(&mut self, handle: Handle);
}

impl<F: FnMut(Handle)> MountPoint for F {
    fn navigate(&mut self, handle: Handle) {
        self(handle)
    }
}
