//! Error types for qrpayload operations
//!
//! Payload formatting itself is total and never produces these; they cover the
//! ambient surface around it (configuration, field files, storage, rendering).

use thiserror::Error;

/// Result type alias using qrpayload's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrpayload operations
#[derive(Error, Debug)]
pub enum Error {
    /// Field input could not be parsed
    #[error("Invalid field input: {0}")]
    Fields(String),

    /// Unknown content type identifier
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    /// Persisted key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// A visual element rejected an update
    #[error("Element error: {0}")]
    Element(String),

    /// Listener registration or removal failed
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "render")]
impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
