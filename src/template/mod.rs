//! QR content templates
//!
//! Each content type has one formatter that turns the current form values into
//! the exact text a scanner expects (`WIFI:`, `MECARD:`, `BEGIN:VCARD`, ...).
//! Formatters are total: missing inputs fall back to documented defaults, so
//! there is no error channel here.

mod contact;
mod event;
mod links;
mod network;
mod uri;

pub use contact::{mecard, vcard};
pub use event::{event, format_timestamp, parse_timestamp};
pub use links::{APP_STORES, SOCIAL_PROFILES, app, social};
pub use network::wifi;
pub use uri::{bitcoin, email, geo, phone, sms, text};

use crate::error::Error;
use crate::fields::{Field, FieldSource};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Payload produced when the active selector names no known content type.
pub const FALLBACK_PAYLOAD: &str = "https://github.com";

/// A formatter reads form values and returns the payload string.
pub type Formatter = fn(&dyn FieldSource) -> String;

/// The closed set of payload kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Free text or URL
    Text,
    /// Wi-Fi network credentials
    Wifi,
    /// vCard 3.0 contact
    Vcard,
    /// MECARD contact
    Mecard,
    /// iCalendar VEVENT
    Event,
    /// BIP21 bitcoin URI
    Bitcoin,
    /// RFC 5870 geo URI
    Geo,
    /// Social profile link
    Social,
    /// App store link
    App,
    /// mailto URI
    Email,
    /// sms URI
    Sms,
    /// tel URI
    Phone,
}

impl ContentType {
    /// All content types in display order.
    pub const ALL: [ContentType; 12] = [
        ContentType::Text,
        ContentType::Wifi,
        ContentType::Vcard,
        ContentType::Mecard,
        ContentType::Event,
        ContentType::Bitcoin,
        ContentType::Geo,
        ContentType::Social,
        ContentType::App,
        ContentType::Email,
        ContentType::Sms,
        ContentType::Phone,
    ];

    /// Lowercase identifier used by selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Wifi => "wifi",
            ContentType::Vcard => "vcard",
            ContentType::Mecard => "mecard",
            ContentType::Event => "event",
            ContentType::Bitcoin => "bitcoin",
            ContentType::Geo => "geo",
            ContentType::Social => "social",
            ContentType::App => "app",
            ContentType::Email => "email",
            ContentType::Sms => "sms",
            ContentType::Phone => "phone",
        }
    }

    /// Content type whose identifier is exactly `id`.
    pub fn from_id(id: &str) -> Option<Self> {
        ContentType::ALL.into_iter().find(|kind| kind.as_str() == id)
    }

    /// The formatter for this content type.
    pub fn formatter(self) -> Formatter {
        match self {
            ContentType::Text => text,
            ContentType::Wifi => wifi,
            ContentType::Vcard => vcard,
            ContentType::Mecard => mecard,
            ContentType::Event => event,
            ContentType::Bitcoin => bitcoin,
            ContentType::Geo => geo,
            ContentType::Social => social,
            ContentType::App => app,
            ContentType::Email => email,
            ContentType::Sms => sms,
            ContentType::Phone => phone,
        }
    }

    /// Fields read by this content type's formatter, in form order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL
            .into_iter()
            .filter(move |field| field.content_type() == self)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        ContentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownContentType(value.to_string()))
    }
}

/// Format the payload for a content type from the current field values.
pub fn format(content_type: ContentType, fields: &dyn FieldSource) -> String {
    let payload = (content_type.formatter())(fields);
    tracing::trace!(%content_type, bytes = payload.len(), "Formatted payload");
    payload
}

/// Format the payload for whichever template the UI marks as active.
///
/// The selector must be an exact lowercase identifier; anything else produces
/// [`FALLBACK_PAYLOAD`]. Use [`ContentType::from_str`] for lenient parsing.
pub fn format_active(selector: &str, fields: &dyn FieldSource) -> String {
    match ContentType::from_id(selector) {
        Some(content_type) => format(content_type, fields),
        None => {
            tracing::debug!(selector, "Unknown template selector, using fallback payload");
            FALLBACK_PAYLOAD.to_string()
        }
    }
}

/// Percent-encode a URI component.
///
/// Leaves ASCII alphanumerics and `-_.!~*'()` as-is, like a browser's
/// `encodeURIComponent`, so scanners see the same bytes a web form would emit.
pub fn encode_component(value: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(value);
    if !encoded.contains('%') {
        return encoded;
    }

    let mut out = String::with_capacity(encoded.len());
    let mut rest: &str = &encoded;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos..pos + 3];
        match escape {
            "%21" => out.push('!'),
            "%27" => out.push('\''),
            "%28" => out.push('('),
            "%29" => out.push(')'),
            "%2A" => out.push('*'),
            other => out.push_str(other),
        }
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Join `key=value` pairs onto a base URI with `?` and `&`, if there are any.
fn with_query(base: String, params: &[String]) -> String {
    if params.is_empty() {
        base
    } else {
        format!("{base}?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    #[test]
    fn test_content_type_parsing() {
        assert_eq!("wifi".parse::<ContentType>().unwrap(), ContentType::Wifi);
        assert_eq!(" VCard ".parse::<ContentType>().unwrap(), ContentType::Vcard);
        assert!(matches!(
            "fax".parse::<ContentType>(),
            Err(Error::UnknownContentType(_))
        ));
        for kind in ContentType::ALL {
            assert_eq!(kind.to_string().parse::<ContentType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_every_type_reads_at_least_one_field() {
        for kind in ContentType::ALL {
            assert!(kind.fields().next().is_some(), "{kind} has no fields");
        }
        let wifi: Vec<_> = ContentType::Wifi.fields().collect();
        assert_eq!(
            wifi,
            vec![
                Field::WifiSsid,
                Field::WifiPassword,
                Field::WifiEncryption,
                Field::WifiHidden
            ]
        );
    }

    #[test]
    fn test_empty_inputs_produce_sentinels() {
        let empty = FieldMap::new();
        let expected = [
            (ContentType::Text, "https://github.com"),
            (ContentType::Wifi, "WIFI:T:;S:WiFi;;"),
            (
                ContentType::Vcard,
                "BEGIN:VCARD\nVERSION:3.0\nN:Doe;John;;;\nFN:John Doe\nEND:VCARD",
            ),
            (ContentType::Mecard, "MECARD:;"),
            (ContentType::Event, "BEGIN:VEVENT\nSUMMARY:Event\nEND:VEVENT"),
            (ContentType::Bitcoin, "bitcoin:"),
            (ContentType::Geo, "geo:0,0"),
            (ContentType::Social, "https://.com/"),
            (ContentType::App, "https://store..com/app/"),
            (ContentType::Email, "mailto:test@example.com"),
            (ContentType::Sms, "sms:+1234567890"),
            (ContentType::Phone, "tel:+1234567890"),
        ];
        for (kind, sentinel) in expected {
            assert_eq!(format(kind, &empty), sentinel, "{kind}");
        }
    }

    #[test]
    fn test_active_dispatch_and_fallback() {
        let fields = FieldMap::new().with(Field::PhoneNumber, "+4930123");
        assert_eq!(format_active("phone", &fields), "tel:+4930123");
        assert_eq!(format_active("carrier-pigeon", &fields), FALLBACK_PAYLOAD);
        assert_eq!(format_active("", &fields), FALLBACK_PAYLOAD);
    }

    #[test]
    fn test_active_selector_is_exact() {
        let fields = FieldMap::new().with(Field::WifiSsid, "Net");
        assert_eq!(format_active("wifi", &fields), "WIFI:T:;S:Net;;");
        assert_eq!(format_active("WIFI", &fields), FALLBACK_PAYLOAD);
        assert_eq!(format_active(" wifi", &fields), FALLBACK_PAYLOAD);
        assert_eq!(ContentType::from_id("Wifi"), None);
        assert_eq!("Wifi".parse::<ContentType>().unwrap(), ContentType::Wifi);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let fields = FieldMap::new()
            .with(Field::EventTitle, "Standup")
            .with(Field::EventStart, "2024-01-02T03:04:05")
            .with(Field::EventTimezone, "Europe/Berlin");
        assert_eq!(
            format(ContentType::Event, &fields),
            format(ContentType::Event, &fields)
        );
    }

    #[test]
    fn test_component_encoding_matches_browser_rules() {
        assert_eq!(encode_component("plain-text_1.0~"), "plain-text_1.0~");
        assert_eq!(encode_component("Hello World!"), "Hello%20World!");
        assert_eq!(encode_component("(it's) *fine*"), "(it's)%20*fine*");
        assert_eq!(encode_component("a&b=c?d/e"), "a%26b%3Dc%3Fd%2Fe");
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("100%"), "100%25");
    }
}
