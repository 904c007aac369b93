//! Light/dark theme switching
//!
//! The [`ThemeController`] resolves the initial theme from a persisted user
//! override, then the host's appearance signal, then light. It applies it to a
//! small set of abstract visual elements and broadcasts every change.
//!
//! ```
//! use std::sync::Arc;
//! use qrpayload::config::ThemeOptions;
//! use qrpayload::theme::{
//!     MemoryElement, MemorySignal, MemoryStore, MemoryToggle, Theme, ThemeController,
//!     ThemeElements,
//! };
//!
//! let root = Arc::new(MemoryElement::new());
//! let toggle = Arc::new(MemoryToggle::new());
//! let elements = ThemeElements {
//!     root: root.clone(),
//!     toggle: Some(toggle.clone()),
//!     icon_light: Some(Arc::new(MemoryElement::new())),
//!     icon_dark: Some(Arc::new(MemoryElement::new())),
//! };
//! let signal = Arc::new(MemorySignal::new(true));
//!
//! let controller = ThemeController::attach(
//!     elements,
//!     Arc::new(MemoryStore::new()),
//!     Some(signal),
//!     &ThemeOptions::default(),
//! )
//! .expect("all elements present");
//!
//! assert_eq!(controller.current(), Theme::Dark);
//! toggle.click();
//! assert_eq!(controller.current(), Theme::Light);
//! ```

mod controller;
mod headless;
mod store;
mod subscription;
mod surface;

pub use controller::{THEME_ATTRIBUTE, ThemeController, ThemeElements};
pub use headless::{MemoryElement, MemorySignal, MemoryToggle};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use subscription::Subscription;
pub use surface::{
    AppearanceSignal, ClickHandler, Element, KeyHandler, SignalHandler, ToggleControl,
    is_activation_key,
};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two visual states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light appearance; the root carries no theme marker
    #[default]
    Light,
    /// Dark appearance
    Dark,
}

impl Theme {
    /// Persisted and displayed identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other state.
    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Map the host's "prefers dark" signal to a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    /// Interpret a stored override. Anything other than `dark` applies as light.
    pub fn from_stored(value: &str) -> Self {
        if value == Theme::Dark.as_str() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Accessible label for the toggle while this theme is shown.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::Other(format!(
                "Unknown theme '{other}', expected 'light' or 'dark'"
            ))),
        }
    }
}

/// Broadcast after every applied theme change. Serializes as `{"theme":"dark"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    /// The theme now shown
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_values() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("sepia"), Theme::Light);
    }

    #[test]
    fn test_opposite_flips() {
        assert_eq!(Theme::Light.opposite(), Theme::Dark);
        assert_eq!(Theme::Dark.opposite().opposite(), Theme::Dark);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_change_event_shape() {
        let json = serde_json::to_string(&ThemeChanged { theme: Theme::Dark }).unwrap();
        assert_eq!(json, r#"{"theme":"dark"}"#);
    }
}
