//! Named form inputs consumed by the payload formatters
//!
//! Formatters never talk to a UI toolkit directly. They read through a
//! [`FieldSource`], which any host (form binding, CLI arguments, a file) can
//! implement. Absent and empty values are indistinguishable to a formatter.

use crate::error::{Error, Result};
use crate::template::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Every named input a formatter may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Field {
    TextContent,

    WifiSsid,
    WifiPassword,
    WifiEncryption,
    WifiHidden,

    VcardName,
    VcardOrg,
    VcardTitle,
    VcardPhone,
    VcardEmail,
    VcardUrl,
    VcardAddress,

    MecardName,
    MecardPhone,
    MecardEmail,
    MecardUrl,
    MecardAddress,
    MecardBirthday,
    MecardNote,

    EventTitle,
    EventStart,
    EventEnd,
    EventLocation,
    EventDescription,
    EventTimezone,

    BitcoinAddress,
    BitcoinAmount,
    BitcoinLabel,
    BitcoinMessage,

    GeoLatitude,
    GeoLongitude,
    GeoAltitude,
    GeoQuery,

    SocialPlatform,
    SocialUsername,

    AppPlatform,
    AppId,

    EmailTo,
    EmailSubject,
    EmailBody,

    SmsPhone,
    SmsMessage,

    PhoneNumber,
}

impl Field {
    /// All fields, grouped by content type in form order.
    pub const ALL: [Field; 43] = [
        Field::TextContent,
        Field::WifiSsid,
        Field::WifiPassword,
        Field::WifiEncryption,
        Field::WifiHidden,
        Field::VcardName,
        Field::VcardOrg,
        Field::VcardTitle,
        Field::VcardPhone,
        Field::VcardEmail,
        Field::VcardUrl,
        Field::VcardAddress,
        Field::MecardName,
        Field::MecardPhone,
        Field::MecardEmail,
        Field::MecardUrl,
        Field::MecardAddress,
        Field::MecardBirthday,
        Field::MecardNote,
        Field::EventTitle,
        Field::EventStart,
        Field::EventEnd,
        Field::EventLocation,
        Field::EventDescription,
        Field::EventTimezone,
        Field::BitcoinAddress,
        Field::BitcoinAmount,
        Field::BitcoinLabel,
        Field::BitcoinMessage,
        Field::GeoLatitude,
        Field::GeoLongitude,
        Field::GeoAltitude,
        Field::GeoQuery,
        Field::SocialPlatform,
        Field::SocialUsername,
        Field::AppPlatform,
        Field::AppId,
        Field::EmailTo,
        Field::EmailSubject,
        Field::EmailBody,
        Field::SmsPhone,
        Field::SmsMessage,
        Field::PhoneNumber,
    ];

    /// Stable identifier of the input, e.g. `wifi-ssid`.
    pub fn id(self) -> &'static str {
        match self {
            Field::TextContent => "text-content",
            Field::WifiSsid => "wifi-ssid",
            Field::WifiPassword => "wifi-password",
            Field::WifiEncryption => "wifi-encryption",
            Field::WifiHidden => "wifi-hidden",
            Field::VcardName => "vcard-name",
            Field::VcardOrg => "vcard-org",
            Field::VcardTitle => "vcard-title",
            Field::VcardPhone => "vcard-phone",
            Field::VcardEmail => "vcard-email",
            Field::VcardUrl => "vcard-url",
            Field::VcardAddress => "vcard-address",
            Field::MecardName => "mecard-name",
            Field::MecardPhone => "mecard-phone",
            Field::MecardEmail => "mecard-email",
            Field::MecardUrl => "mecard-url",
            Field::MecardAddress => "mecard-address",
            Field::MecardBirthday => "mecard-birthday",
            Field::MecardNote => "mecard-note",
            Field::EventTitle => "event-title",
            Field::EventStart => "event-start",
            Field::EventEnd => "event-end",
            Field::EventLocation => "event-location",
            Field::EventDescription => "event-description",
            Field::EventTimezone => "event-timezone",
            Field::BitcoinAddress => "bitcoin-address",
            Field::BitcoinAmount => "bitcoin-amount",
            Field::BitcoinLabel => "bitcoin-label",
            Field::BitcoinMessage => "bitcoin-message",
            Field::GeoLatitude => "geo-latitude",
            Field::GeoLongitude => "geo-longitude",
            Field::GeoAltitude => "geo-altitude",
            Field::GeoQuery => "geo-query",
            Field::SocialPlatform => "social-platform",
            Field::SocialUsername => "social-username",
            Field::AppPlatform => "app-platform",
            Field::AppId => "app-id",
            Field::EmailTo => "email-to",
            Field::EmailSubject => "email-subject",
            Field::EmailBody => "email-body",
            Field::SmsPhone => "sms-phone",
            Field::SmsMessage => "sms-message",
            Field::PhoneNumber => "phone-number",
        }
    }

    /// Look a field up by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.id() == id)
    }

    /// The content type whose formatter reads this field.
    pub fn content_type(self) -> ContentType {
        use Field::*;
        match self {
            TextContent => ContentType::Text,
            WifiSsid | WifiPassword | WifiEncryption | WifiHidden => ContentType::Wifi,
            VcardName | VcardOrg | VcardTitle | VcardPhone | VcardEmail | VcardUrl
            | VcardAddress => ContentType::Vcard,
            MecardName | MecardPhone | MecardEmail | MecardUrl | MecardAddress
            | MecardBirthday | MecardNote => ContentType::Mecard,
            EventTitle | EventStart | EventEnd | EventLocation | EventDescription
            | EventTimezone => ContentType::Event,
            BitcoinAddress | BitcoinAmount | BitcoinLabel | BitcoinMessage => {
                ContentType::Bitcoin
            }
            GeoLatitude | GeoLongitude | GeoAltitude | GeoQuery => ContentType::Geo,
            SocialPlatform | SocialUsername => ContentType::Social,
            AppPlatform | AppId => ContentType::App,
            EmailTo | EmailSubject | EmailBody => ContentType::Email,
            SmsPhone | SmsMessage => ContentType::Sms,
            PhoneNumber => ContentType::Phone,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Read-only access to the current form values.
///
/// Implementations are queried fresh on every formatting call and must not
/// cache on the formatter's behalf.
pub trait FieldSource {
    /// Text value of a field, if the host has one.
    fn text(&self, field: Field) -> Option<String>;

    /// Checkbox state of a field. Absent means unchecked.
    fn checked(&self, field: Field) -> bool {
        self.text(field).is_some_and(|value| is_truthy(&value))
    }

    /// Text value with empty strings folded into `None`.
    fn present(&self, field: Field) -> Option<String> {
        self.text(field).filter(|value| !value.is_empty())
    }

    /// Text value or an empty string.
    fn value(&self, field: Field) -> String {
        self.text(field).unwrap_or_default()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1" | "checked"
    )
}

/// A single stored input value.
///
/// Field files may write numeric inputs such as coordinates or amounts
/// unquoted; those read back as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Flag(bool),
    /// Unquoted number
    Number(serde_json::Number),
    /// Free text
    Text(String),
}

/// In-memory [`FieldSource`] keyed by field identifier.
///
/// Keys that do not name a known field are kept but never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    values: HashMap<String, FieldValue>,
}

impl FieldMap {
    /// Create an empty map; every field reads as absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text value, returning the map for chaining.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a checkbox value, returning the map for chaining.
    pub fn with_flag(mut self, field: Field, checked: bool) -> Self {
        self.set_flag(field, checked);
        self
    }

    /// Set a text value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values
            .insert(field.id().to_string(), FieldValue::Text(value.into()));
    }

    /// Set a checkbox value.
    pub fn set_flag(&mut self, field: Field, checked: bool) {
        self.values
            .insert(field.id().to_string(), FieldValue::Flag(checked));
    }

    /// Remove a value so the field reads as absent again.
    pub fn clear(&mut self, field: Field) {
        self.values.remove(field.id());
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a `field-id=value` assignment, as given on the command line.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<Field> {
        let (id, value) = assignment.split_once('=').ok_or_else(|| {
            Error::Fields(format!("expected field-id=value, got '{assignment}'"))
        })?;
        let field = Field::from_id(id.trim())
            .ok_or_else(|| Error::Fields(format!("unknown field '{}'", id.trim())))?;
        self.set(field, value);
        Ok(field)
    }

    /// Merge another map on top of this one; values in `other` win.
    pub fn merge(&mut self, other: FieldMap) {
        self.values.extend(other.values);
    }

    /// Read a map of field identifiers to values from a JSON, TOML or YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Fields(format!("Failed to read {}: {e}", path.display())))?;

        let map: FieldMap = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "json" => serde_json::from_str(&contents).map_err(|e| {
                Error::Fields(format!("Failed to parse JSON {}: {e}", path.display()))
            })?,
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Fields(format!("Failed to parse TOML {}: {e}", path.display()))
            })?,
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Fields(format!("Failed to parse YAML {}: {e}", path.display()))
            })?,
            other => {
                return Err(Error::Fields(format!(
                    "Unsupported field file format '{other}', expected json/toml/yaml"
                )));
            }
        };

        for key in map.values.keys() {
            if Field::from_id(key).is_none() {
                tracing::warn!(field = %key, "Ignoring unknown field in {}", path.display());
            }
        }

        Ok(map)
    }
}

impl FieldSource for FieldMap {
    fn text(&self, field: Field) -> Option<String> {
        match self.values.get(field.id())? {
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Number(number) => Some(number.to_string()),
            FieldValue::Flag(_) => None,
        }
    }

    fn checked(&self, field: Field) -> bool {
        match self.values.get(field.id()) {
            Some(FieldValue::Flag(checked)) => *checked,
            Some(FieldValue::Text(text)) => is_truthy(text),
            Some(FieldValue::Number(number)) => number.as_u64() == Some(1),
            None => false,
        }
    }
}
