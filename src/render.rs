//! Rendering formatted payloads as QR symbols

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use image::{DynamicImage, Luma};
use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode};
use std::path::Path;

/// QR symbol renderer for payload strings
pub struct QrRenderer {
    /// Error correction level
    ecc_level: EcLevel,
    /// Minimum edge length of rendered images
    min_size: u32,
}

impl QrRenderer {
    /// Create a renderer with default settings (Medium ECC, 400px)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
            min_size: 400,
        }
    }

    /// Create a renderer with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self {
            ecc_level,
            ..Self::new()
        }
    }

    /// Build a renderer from configuration
    pub fn from_options(options: &RenderOptions) -> Result<Self> {
        Ok(Self {
            ecc_level: parse_ecc_level(&options.ecc)?,
            min_size: options.min_size,
        })
    }

    fn code(&self, payload: &str) -> Result<QrCode> {
        QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))
    }

    /// Render a payload into a grayscale image
    pub fn render_image(&self, payload: &str) -> Result<DynamicImage> {
        let image = self
            .code(payload)?
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        Ok(DynamicImage::ImageLuma8(image))
    }

    /// Render a payload and save it as a PNG file
    pub fn save_png(&self, payload: &str, path: &Path) -> Result<()> {
        self.render_image(payload)?
            .save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!(path = %path.display(), bytes = payload.len(), "Saved QR image");
        Ok(())
    }

    /// Render a payload as half-block characters for a terminal
    pub fn render_terminal(&self, payload: &str) -> Result<String> {
        Ok(self
            .code(payload)?
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(true)
            .build())
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an error correction level name (`L`, `M`, `Q`, `H`).
pub fn parse_ecc_level(value: &str) -> Result<EcLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(Error::Config(format!(
            "Unknown error correction level '{other}'. Use L, M, Q or H"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Field, FieldMap};
    use crate::template::{self, ContentType};

    #[test]
    fn test_renders_wifi_payload() {
        let fields = FieldMap::new()
            .with(Field::WifiSsid, "Cafe")
            .with(Field::WifiEncryption, "WPA")
            .with(Field::WifiPassword, "hunter2");
        let payload = template::format(ContentType::Wifi, &fields);

        let image = QrRenderer::new().render_image(&payload).unwrap();
        assert!(image.width() >= 400);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_renders_terminal_block() {
        let rendered = QrRenderer::with_ecc_level(EcLevel::L)
            .render_terminal("tel:+1234567890")
            .unwrap();
        assert!(rendered.lines().count() > 10);
    }

    #[test]
    fn test_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo.png");
        QrRenderer::new().save_png("geo:0,0", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_ecc_from_options() {
        let options = RenderOptions {
            ecc: "q".to_string(),
            min_size: 200,
        };
        let renderer = QrRenderer::from_options(&options).unwrap();
        assert_eq!(renderer.ecc_level, EcLevel::Q);
        assert_eq!(renderer.min_size, 200);

        assert!(parse_ecc_level("Z").is_err());
    }
}
