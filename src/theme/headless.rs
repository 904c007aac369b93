//! In-memory elements and signals for headless hosts

use super::surface::{
    AppearanceSignal, ClickHandler, Element, KeyHandler, SignalHandler, ToggleControl,
};
use super::Subscription;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of listeners of one kind.
struct Listeners<F: ?Sized> {
    next_id: AtomicU64,
    entries: Arc<Mutex<Vec<(u64, Arc<F>)>>>,
}

impl<F: ?Sized + Send + Sync + 'static> Listeners<F> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn add(&self, label: &'static str, handler: Arc<F>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handler));

        let entries = Arc::downgrade(&self.entries);
        Subscription::new(label, move || {
            // The owning element is gone, and its listeners with it.
            let Some(entries) = entries.upgrade() else {
                return Ok(());
            };
            let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
            match entries.iter().position(|(entry, _)| *entry == id) {
                Some(index) => {
                    entries.remove(index);
                    Ok(())
                }
                None => Err(Error::Subscription(format!(
                    "{label} listener {id} was already removed"
                ))),
            }
        })
    }

    // Handlers run outside the lock so they may re-enter the registry.
    fn snapshot(&self) -> Vec<Arc<F>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Element that records its attributes and visibility.
#[derive(Debug, Default)]
pub struct MemoryElement {
    attributes: Mutex<HashMap<String, String>>,
    visible: Mutex<Option<bool>>,
}

impl MemoryElement {
    /// Element with no attributes and unset visibility.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Visibility last set, or `None` if never set.
    pub fn is_visible(&self) -> Option<bool> {
        *self.visible.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Element for MemoryElement {
    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        Ok(())
    }

    fn set_visible(&self, visible: bool) -> Result<()> {
        *self.visible.lock().unwrap_or_else(PoisonError::into_inner) = Some(visible);
        Ok(())
    }
}

/// Toggle control whose clicks and key presses are triggered programmatically.
pub struct MemoryToggle {
    element: MemoryElement,
    clicks: Listeners<dyn Fn() + Send + Sync>,
    keys: Listeners<dyn Fn(&str) + Send + Sync>,
}

impl MemoryToggle {
    /// Toggle with no listeners.
    pub fn new() -> Self {
        Self {
            element: MemoryElement::new(),
            clicks: Listeners::new(),
            keys: Listeners::new(),
        }
    }

    /// Current value of an attribute (e.g. `aria-label`).
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name)
    }

    /// Deliver a click to every click listener.
    pub fn click(&self) {
        for handler in self.clicks.snapshot() {
            handler();
        }
    }

    /// Deliver a key press to every key listener.
    pub fn press_key(&self, key: &str) {
        for handler in self.keys.snapshot() {
            handler(key);
        }
    }

    /// Registered click plus key listeners.
    pub fn listener_count(&self) -> usize {
        self.clicks.len() + self.keys.len()
    }

    /// Drop every listener as if the host tore the control down.
    pub fn remove_all_listeners(&self) {
        self.clicks.clear();
        self.keys.clear();
    }
}

impl Default for MemoryToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for MemoryToggle {
    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.element.set_attribute(name, value)
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.element.remove_attribute(name)
    }

    fn set_visible(&self, visible: bool) -> Result<()> {
        self.element.set_visible(visible)
    }
}

impl ToggleControl for MemoryToggle {
    fn on_click(&self, handler: ClickHandler) -> Result<Subscription> {
        Ok(self.clicks.add("click", Arc::from(handler)))
    }

    fn on_key(&self, handler: KeyHandler) -> Result<Subscription> {
        Ok(self.keys.add("keydown", Arc::from(handler)))
    }
}

/// Appearance preference that can be flipped programmatically.
pub struct MemorySignal {
    prefers_dark: AtomicBool,
    listeners: Listeners<dyn Fn(bool) + Send + Sync>,
}

impl MemorySignal {
    /// Signal with an initial value.
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: AtomicBool::new(prefers_dark),
            listeners: Listeners::new(),
        }
    }

    /// Change the preference and notify listeners.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.store(prefers_dark, Ordering::SeqCst);
        for handler in self.listeners.snapshot() {
            handler(prefers_dark);
        }
    }

    /// Registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl AppearanceSignal for MemorySignal {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }

    fn on_change(&self, handler: SignalHandler) -> Result<Subscription> {
        Ok(self.listeners.add("appearance", Arc::from(handler)))
    }
}
