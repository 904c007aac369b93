//! URI-style payloads: text, bitcoin, geo, mailto, sms, tel

use super::{FALLBACK_PAYLOAD, encode_component, with_query};
use crate::fields::{Field, FieldSource};

const DEFAULT_EMAIL: &str = "test@example.com";
const DEFAULT_PHONE: &str = "+1234567890";
const GEO_ORIGIN: &str = "geo:0,0";

/// Raw text, defaulting to a placeholder URL.
pub fn text(fields: &dyn FieldSource) -> String {
    fields
        .present(Field::TextContent)
        .unwrap_or_else(|| FALLBACK_PAYLOAD.to_string())
}

/// BIP21 `bitcoin:<address>[?amount=..&label=..&message=..]`.
///
/// The amount is passed through as typed; label and message are encoded.
pub fn bitcoin(fields: &dyn FieldSource) -> String {
    let address = fields.value(Field::BitcoinAddress);

    let mut params = Vec::new();
    if let Some(amount) = fields.present(Field::BitcoinAmount) {
        params.push(format!("amount={amount}"));
    }
    if let Some(label) = fields.present(Field::BitcoinLabel) {
        params.push(format!("label={}", encode_component(&label)));
    }
    if let Some(message) = fields.present(Field::BitcoinMessage) {
        params.push(format!("message={}", encode_component(&message)));
    }

    with_query(format!("bitcoin:{address}"), &params)
}

/// `geo:<lat>,<lng>[,<alt>][?q=<query>]`, or `geo:0,0` without both coordinates.
pub fn geo(fields: &dyn FieldSource) -> String {
    let (Some(latitude), Some(longitude)) = (
        fields.present(Field::GeoLatitude),
        fields.present(Field::GeoLongitude),
    ) else {
        return GEO_ORIGIN.to_string();
    };

    let mut uri = format!("geo:{latitude},{longitude}");
    if let Some(altitude) = fields.present(Field::GeoAltitude) {
        uri.push(',');
        uri.push_str(&altitude);
    }
    if let Some(query) = fields.present(Field::GeoQuery) {
        uri.push_str("?q=");
        uri.push_str(&encode_component(&query));
    }
    uri
}

/// `mailto:<to>[?subject=..&body=..]`
pub fn email(fields: &dyn FieldSource) -> String {
    let to = fields
        .present(Field::EmailTo)
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    let params: Vec<String> = [(Field::EmailSubject, "subject"), (Field::EmailBody, "body")]
        .into_iter()
        .filter_map(|(field, key)| {
            fields
                .present(field)
                .map(|value| format!("{key}={}", encode_component(&value)))
        })
        .collect();

    with_query(format!("mailto:{to}"), &params)
}

/// `sms:<phone>[?body=..]`
pub fn sms(fields: &dyn FieldSource) -> String {
    let phone = fields
        .present(Field::SmsPhone)
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());

    match fields.present(Field::SmsMessage) {
        Some(message) => format!("sms:{phone}?body={}", encode_component(&message)),
        None => format!("sms:{phone}"),
    }
}

/// `tel:<number>`
pub fn phone(fields: &dyn FieldSource) -> String {
    let number = fields
        .present(Field::PhoneNumber)
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());
    format!("tel:{number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    #[test]
    fn test_text_passthrough() {
        let fields = FieldMap::new().with(Field::TextContent, "hello; world");
        assert_eq!(text(&fields), "hello; world");
    }

    #[test]
    fn test_bitcoin_address_only() {
        let fields = FieldMap::new().with(Field::BitcoinAddress, "bc1qxyz");
        assert_eq!(bitcoin(&fields), "bitcoin:bc1qxyz");
    }

    #[test]
    fn test_bitcoin_query_parameters() {
        let fields = FieldMap::new()
            .with(Field::BitcoinAddress, "bc1qxyz")
            .with(Field::BitcoinAmount, "0.0015")
            .with(Field::BitcoinLabel, "Coffee & Co")
            .with(Field::BitcoinMessage, "Order #42");
        assert_eq!(
            bitcoin(&fields),
            "bitcoin:bc1qxyz?amount=0.0015&label=Coffee%20%26%20Co&message=Order%20%2342"
        );
    }

    #[test]
    fn test_bitcoin_params_without_address() {
        let fields = FieldMap::new().with(Field::BitcoinMessage, "hi");
        assert_eq!(bitcoin(&fields), "bitcoin:?message=hi");
    }

    #[test]
    fn test_geo_requires_both_coordinates() {
        let lat_only = FieldMap::new()
            .with(Field::GeoLatitude, "51.5")
            .with(Field::GeoQuery, "London");
        assert_eq!(geo(&lat_only), "geo:0,0");

        let lng_only = FieldMap::new().with(Field::GeoLongitude, "-0.12");
        assert_eq!(geo(&lng_only), "geo:0,0");
    }

    #[test]
    fn test_geo_full() {
        let fields = FieldMap::new()
            .with(Field::GeoLatitude, "51.5")
            .with(Field::GeoLongitude, "-0.12")
            .with(Field::GeoAltitude, "35")
            .with(Field::GeoQuery, "Big Ben");
        assert_eq!(geo(&fields), "geo:51.5,-0.12,35?q=Big%20Ben");

        let flat = FieldMap::new()
            .with(Field::GeoLatitude, "0")
            .with(Field::GeoLongitude, "0");
        assert_eq!(geo(&flat), "geo:0,0");
    }

    #[test]
    fn test_email_params() {
        let fields = FieldMap::new()
            .with(Field::EmailTo, "ada@example.org")
            .with(Field::EmailSubject, "Engine notes")
            .with(Field::EmailBody, "See attached: v2?");
        assert_eq!(
            email(&fields),
            "mailto:ada@example.org?subject=Engine%20notes&body=See%20attached%3A%20v2%3F"
        );

        let body_only = FieldMap::new().with(Field::EmailBody, "hi");
        assert_eq!(email(&body_only), "mailto:test@example.com?body=hi");
    }

    #[test]
    fn test_sms_and_phone() {
        let fields = FieldMap::new()
            .with(Field::SmsPhone, "+15550100")
            .with(Field::SmsMessage, "On my way!");
        assert_eq!(sms(&fields), "sms:+15550100?body=On%20my%20way!");

        let number = FieldMap::new().with(Field::PhoneNumber, "+15550199");
        assert_eq!(phone(&number), "tel:+15550199");
    }
}
