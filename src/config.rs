//! qrpayload runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the configured log level.
pub const LOG_LEVEL_ENV: &str = "QRPAYLOAD_LOG_LEVEL";

/// Storage key holding the persisted theme override.
pub const DEFAULT_THEME_KEY: &str = "qr-generator-theme";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrPayloadConfig {
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Theme controller configuration
    pub theme: ThemeOptions,
    /// QR rendering configuration
    pub render: RenderOptions,
}

impl QrPayloadConfig {
    /// Load configuration from an explicit path, else the first discovered
    /// file, else defaults; environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_file()?,
        };

        let mut config = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)?
            }
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate locations, most specific first: the working directory,
    /// then `$XDG_CONFIG_HOME/qrpayload`.
    fn candidates() -> Result<Vec<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        let mut paths: Vec<PathBuf> = ["qrpayload.toml", "qrpayload.yaml", "qrpayload.yml"]
            .into_iter()
            .map(|name| cwd.join(name))
            .collect();

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrpayload");
            paths.extend(["config.toml", "config.yaml"].map(|name| base.join(name)));
        }
        Ok(paths)
    }

    fn discover_file() -> Result<Option<PathBuf>> {
        Ok(Self::candidates()?.into_iter().find(|path| path.is_file()))
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        format.parse(&contents).map_err(|e| {
            Error::Config(format!(
                "Failed to parse {} {}: {e}",
                format.name(),
                path.display()
            ))
        })
    }

    fn apply_env_overrides(&mut self) {
        self.logging.apply_env_overrides();
        self.theme.apply_env_overrides();
        self.render.apply_env_overrides();
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(Error::Config(format!(
                "Unsupported config format '{other}', expected toml/yaml"
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }

    fn parse(self, contents: &str) -> std::result::Result<QrPayloadConfig, String> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRPAYLOAD_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            self.level = level;
        }
        if let Ok(file) = env::var("QRPAYLOAD_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = env_parsed("QRPAYLOAD_LOG_COLOR", parse_flag) {
            self.color = color;
        }
        if let Some(rotation) = env_parsed("QRPAYLOAD_LOG_ROTATION", LogRotation::parse) {
            self.rotation = Some(rotation);
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Theme controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOptions {
    /// Key under which the user override is persisted
    pub storage_key: String,
    /// JSON file backing the persisted override; in-memory only when unset
    pub store_path: Option<PathBuf>,
    /// Window in milliseconds during which repeated activations are dropped
    pub debounce_ms: u64,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_THEME_KEY.to_string(),
            store_path: None,
            debounce_ms: 100,
        }
    }
}

impl ThemeOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("QRPAYLOAD_THEME_KEY") {
            if !key.trim().is_empty() {
                self.storage_key = key;
            }
        }
        if let Ok(path) = env::var("QRPAYLOAD_THEME_STORE") {
            if path.trim().is_empty() {
                self.store_path = None;
            } else {
                self.store_path = Some(PathBuf::from(path));
            }
        }
        if let Some(debounce) = env_parsed("QRPAYLOAD_THEME_DEBOUNCE_MS", |v| v.parse::<u64>().ok()) {
            self.debounce_ms = debounce;
        }
    }

    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// QR symbol rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Error correction level (`L`, `M`, `Q` or `H`)
    pub ecc: String,
    /// Minimum edge length in pixels of rendered PNG images
    pub min_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ecc: "M".to_string(),
            min_size: 400,
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(ecc) = env::var("QRPAYLOAD_RENDER_ECC") {
            self.ecc = ecc;
        }
        if let Some(size) = env_parsed("QRPAYLOAD_RENDER_SIZE", |v| v.parse::<u32>().ok()) {
            self.min_size = size.max(21);
        }
    }
}

/// Read an environment variable through `parse`, ignoring unset or invalid values.
fn env_parsed<T>(name: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        tracing::warn!(variable = name, value = %raw, "Ignoring invalid environment override");
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = QrPayloadConfig::default();
        assert_eq!(config.theme.storage_key, "qr-generator-theme");
        assert_eq!(config.theme.debounce(), Duration::from_millis(100));
        assert!(config.theme.store_path.is_none());
        assert_eq!(config.render.ecc, "M");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parses_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrpayload.toml");
        fs::write(
            &path,
            "[theme]\ndebounce_ms = 250\nstore_path = \"/tmp/theme.json\"\n\n[logging]\nrotation = \"daily\"\n",
        )
        .unwrap();

        let config = QrPayloadConfig::from_file(&path).unwrap();
        assert_eq!(config.theme.debounce_ms, 250);
        assert_eq!(
            config.theme.store_path.as_deref(),
            Some(Path::new("/tmp/theme.json"))
        );
        assert_eq!(config.theme.storage_key, DEFAULT_THEME_KEY);
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_parses_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "render:\n  ecc: H\n  min_size: 256\n").unwrap();

        let config = QrPayloadConfig::from_file(&path).unwrap();
        assert_eq!(config.render.ecc, "H");
        assert_eq!(config.render.min_size, 256);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "level=info").unwrap();

        let err = QrPayloadConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(LogRotation::parse(" Hourly "), Some(LogRotation::Hourly));
        assert_eq!(LogRotation::parse("weekly"), None);
    }
}
