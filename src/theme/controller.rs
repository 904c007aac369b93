//! Theme resolution, application and user toggling

use super::surface::{AppearanceSignal, Element, ToggleControl, is_activation_key};
use super::{KeyValueStore, Subscription, Theme, ThemeChanged};
use crate::config::ThemeOptions;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Root attribute marking the dark theme; absent for light.
pub const THEME_ATTRIBUTE: &str = "data-theme";

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// The visual elements a controller drives.
///
/// The toggle and both icons are required; [`ThemeController::attach`] refuses
/// to wire anything if one is missing.
pub struct ThemeElements {
    /// Document root carrying [`THEME_ATTRIBUTE`]
    pub root: Arc<dyn Element>,
    /// Control the user activates
    pub toggle: Option<Arc<dyn ToggleControl>>,
    /// Icon shown while the light theme is active
    pub icon_light: Option<Arc<dyn Element>>,
    /// Icon shown while the dark theme is active
    pub icon_dark: Option<Arc<dyn Element>>,
}

/// Applies and persists the light/dark theme.
///
/// Detaches every listener it registered when dropped.
pub struct ThemeController {
    inner: Arc<Inner>,
}

struct Inner {
    root: Arc<dyn Element>,
    toggle: Arc<dyn ToggleControl>,
    icon_light: Arc<dyn Element>,
    icon_dark: Arc<dyn Element>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    debounce: Duration,
    current: Mutex<Theme>,
    toggling_until: Mutex<Option<Instant>>,
    changes: broadcast::Sender<ThemeChanged>,
    subscriptions: Mutex<Vec<Subscription>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ThemeController {
    /// Resolve and apply the initial theme, then listen for user activations
    /// and appearance changes.
    ///
    /// Returns `None`, after logging, when a required element is missing.
    pub fn attach(
        elements: ThemeElements,
        store: Arc<dyn KeyValueStore>,
        signal: Option<Arc<dyn AppearanceSignal>>,
        options: &ThemeOptions,
    ) -> Option<Self> {
        let ThemeElements {
            root,
            toggle,
            icon_light,
            icon_dark,
        } = elements;

        let (Some(toggle), Some(icon_light), Some(icon_dark)) = (toggle, icon_light, icon_dark)
        else {
            error!("ThemeController: required elements not found, theme switching disabled");
            return None;
        };

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let inner = Arc::new(Inner {
            root,
            toggle,
            icon_light,
            icon_dark,
            store,
            storage_key: options.storage_key.clone(),
            debounce: options.debounce(),
            current: Mutex::new(Theme::Light),
            toggling_until: Mutex::new(None),
            changes,
            subscriptions: Mutex::new(Vec::new()),
        });

        let stored = inner.stored_override();
        let prefers_dark = signal.as_ref().is_some_and(|signal| signal.prefers_dark());
        let initial = match &stored {
            Some(value) => Theme::from_stored(value),
            None => Theme::from_prefers_dark(prefers_dark),
        };
        info!(
            theme = %initial,
            from_override = stored.is_some(),
            prefers_dark,
            "Applying initial theme"
        );
        inner.apply(initial);

        if let Some(signal) = signal {
            let weak = Arc::downgrade(&inner);
            inner.track(signal.on_change(Box::new(move |prefers_dark: bool| {
                if let Some(inner) = Weak::upgrade(&weak) {
                    inner.on_appearance_change(prefers_dark);
                }
            })));
        }

        let weak = Arc::downgrade(&inner);
        inner.track(inner.toggle.on_click(Box::new(move || {
            if let Some(inner) = Weak::upgrade(&weak) {
                inner.activate();
            }
        })));

        let weak = Arc::downgrade(&inner);
        inner.track(inner.toggle.on_key(Box::new(move |key: &str| {
            if is_activation_key(key) {
                if let Some(inner) = Weak::upgrade(&weak) {
                    inner.activate();
                }
            }
        })));

        Some(Self { inner })
    }

    /// Theme currently applied.
    pub fn current(&self) -> Theme {
        *lock(&self.inner.current)
    }

    /// Receive a [`ThemeChanged`] for every subsequent apply.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChanged> {
        self.inner.changes.subscribe()
    }

    /// Handle a user activation as if the toggle had been clicked.
    pub fn activate(&self) {
        self.inner.activate();
    }

    /// Apply a theme without persisting it.
    pub fn apply(&self, theme: Theme) {
        self.inner.apply(theme);
    }

    /// Listener handles still registered.
    pub fn subscription_count(&self) -> usize {
        lock(&self.inner.subscriptions).len()
    }

    /// Remove every listener this controller registered.
    ///
    /// Failures are logged and do not stop the remaining removals. Safe to
    /// call repeatedly.
    pub fn detach(&self) {
        let subscriptions = std::mem::take(&mut *lock(&self.inner.subscriptions));
        for mut subscription in subscriptions {
            if let Err(err) = subscription.release() {
                warn!(
                    listener = subscription.label(),
                    "Failed to remove listener: {err}"
                );
            }
        }
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Inner {
    fn track(&self, subscription: Result<Subscription>) {
        match subscription {
            Ok(subscription) => lock(&self.subscriptions).push(subscription),
            Err(err) => error!("ThemeController: failed to register listener: {err}"),
        }
    }

    /// Non-empty persisted override, treating read failures as absent.
    fn stored_override(&self) -> Option<String> {
        match self.store.get(&self.storage_key) {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(err) => {
                warn!(key = %self.storage_key, "Failed to read theme override: {err}");
                None
            }
        }
    }

    fn on_appearance_change(&self, prefers_dark: bool) {
        if self.stored_override().is_some() {
            debug!(prefers_dark, "Ignoring appearance change, user override set");
            return;
        }
        self.apply(Theme::from_prefers_dark(prefers_dark));
    }

    fn activate(&self) {
        let now = Instant::now();
        {
            let mut until = lock(&self.toggling_until);
            if until.is_some_and(|deadline| now < deadline) {
                debug!("Theme toggle already in progress, dropping activation");
                return;
            }
            *until = Some(now + self.debounce);
        }

        let next = lock(&self.current).opposite();
        self.apply(next);
        if let Err(err) = self.store.set(&self.storage_key, next.as_str()) {
            error!(key = %self.storage_key, "Failed to persist theme override: {err}");
        }
    }

    fn apply(&self, theme: Theme) {
        *lock(&self.current) = theme;

        if let Err(err) = self.apply_visuals(theme) {
            error!(%theme, "ThemeController: failed to apply theme: {err}");
            return;
        }

        // No receivers is fine.
        let _ = self.changes.send(ThemeChanged { theme });
        debug!(%theme, "Theme applied");
    }

    fn apply_visuals(&self, theme: Theme) -> Result<()> {
        match theme {
            Theme::Dark => {
                self.root.set_attribute(THEME_ATTRIBUTE, Theme::Dark.as_str())?;
                self.icon_light.set_visible(false)?;
                self.icon_dark.set_visible(true)?;
            }
            Theme::Light => {
                self.root.remove_attribute(THEME_ATTRIBUTE)?;
                self.icon_light.set_visible(true)?;
                self.icon_dark.set_visible(false)?;
            }
        }

        let label = theme.toggle_label();
        self.toggle.set_attribute("aria-label", label)?;
        self.toggle.set_attribute("title", label)?;
        Ok(())
    }
}
