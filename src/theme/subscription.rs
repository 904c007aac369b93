//! Owned handles for registered listeners

use crate::error::Result;
use std::fmt;

type Release = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Handle to one registered listener.
///
/// Releasing unregisters the listener. A handle releases at most once; later
/// calls and the release on drop are no-ops.
pub struct Subscription {
    label: &'static str,
    release: Option<Release>,
}

impl Subscription {
    /// Wrap the closure that unregisters a listener.
    pub fn new(label: &'static str, release: impl FnOnce() -> Result<()> + Send + 'static) -> Self {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    /// Short description of what the listener watches, used in diagnostics.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the listener is still registered through this handle.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Unregister the listener.
    pub fn release(&mut self) -> Result<()> {
        match self.release.take() {
            Some(release) => release(),
            None => Ok(()),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(listener = self.label, "Failed to remove listener: {err}");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}
