//! Host-side seams the theme controller drives
//!
//! A GUI binding implements these over its real widgets; the headless
//! implementations in this crate back the CLI and the tests.

use super::Subscription;
use crate::error::Result;

/// Invoked on a pointer activation of the toggle.
pub type ClickHandler = Box<dyn Fn() + Send + Sync + 'static>;
/// Invoked with the key name of a key press on the toggle (`"Enter"`, `" "`, ...).
pub type KeyHandler = Box<dyn Fn(&str) + Send + Sync + 'static>;
/// Invoked with the new "prefers dark" value.
pub type SignalHandler = Box<dyn Fn(bool) + Send + Sync + 'static>;

/// Keys that activate the toggle like a click.
const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

/// Whether a key press should count as a toggle activation.
pub fn is_activation_key(key: &str) -> bool {
    ACTIVATION_KEYS.contains(&key)
}

/// A visual element whose attributes and visibility can be changed.
pub trait Element: Send + Sync {
    /// Set or replace an attribute.
    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Remove an attribute; removing an absent one is not an error.
    fn remove_attribute(&self, name: &str) -> Result<()>;

    /// Show or hide the element.
    fn set_visible(&self, visible: bool) -> Result<()>;
}

/// The control the user activates to switch themes.
pub trait ToggleControl: Element {
    /// Register a click listener.
    fn on_click(&self, handler: ClickHandler) -> Result<Subscription>;

    /// Register a key press listener.
    fn on_key(&self, handler: KeyHandler) -> Result<Subscription>;
}

/// The host's "prefers dark appearance" preference.
pub trait AppearanceSignal: Send + Sync {
    /// Current value.
    fn prefers_dark(&self) -> bool;

    /// Register a listener for changes.
    fn on_change(&self, handler: SignalHandler) -> Result<Subscription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Escape"));
        assert!(!is_activation_key("enter"));
    }
}
