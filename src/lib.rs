//! qrpayload - QR content payloads and a persisted light/dark theme switch
//!
//! This library turns form input into the exact text formats QR scanners
//! understand, and manages a light/dark theme preference for the UI around it.
//!
//! # Features
//!
//! - **Templates**: `WIFI:`, `MECARD:`, vCard 3.0, VEVENT, `bitcoin:`, `geo:`,
//!   `mailto:`, `sms:`, `tel:` plus social and app store links
//! - **Total formatting**: missing inputs fall back to fixed defaults, never errors
//! - **Theme controller**: persisted override, system preference fallback,
//!   debounced toggling and change broadcasts
//! - **Rendering** (`render` feature): PNG and terminal QR output
//!
//! # Example
//!
//! ```
//! use qrpayload::{ContentType, Field, FieldMap, template};
//!
//! let fields = FieldMap::new()
//!     .with(Field::WifiSsid, "Cafe")
//!     .with(Field::WifiEncryption, "WPA")
//!     .with(Field::WifiPassword, "hunter2");
//!
//! let payload = template::format(ContentType::Wifi, &fields);
//! assert_eq!(payload, "WIFI:T:WPA;S:Cafe;P:hunter2;;");
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod template;
pub mod theme;

#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, QrPayloadConfig, RenderOptions, ThemeOptions};
pub use fields::{Field, FieldMap, FieldSource, FieldValue};
pub use template::{ContentType, format, format_active};
pub use theme::{KeyValueStore, Theme, ThemeChanged, ThemeController, ThemeElements};

#[cfg(feature = "render")]
pub use render::QrRenderer;
