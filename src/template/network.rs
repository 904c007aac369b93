//! Wi-Fi network credentials (`WIFI:` scheme)

use crate::fields::{Field, FieldSource};

const DEFAULT_SSID: &str = "WiFi";

/// Encryption modes that mean "open network"; a password is never emitted for them.
const NO_PASSWORD_MODES: [&str; 2] = ["nopass", "no-password"];

/// `WIFI:T:<enc>;S:<ssid>;[P:<pass>;][H:true;];`
pub fn wifi(fields: &dyn FieldSource) -> String {
    let ssid = fields
        .present(Field::WifiSsid)
        .unwrap_or_else(|| DEFAULT_SSID.to_string());
    let encryption = fields.value(Field::WifiEncryption);

    let mut payload = format!("WIFI:T:{encryption};S:{ssid};");
    if let Some(password) = fields.present(Field::WifiPassword) {
        if !NO_PASSWORD_MODES.contains(&encryption.as_str()) {
            payload.push_str(&format!("P:{password};"));
        }
    }
    if fields.checked(Field::WifiHidden) {
        payload.push_str("H:true;");
    }
    payload.push(';');
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    fn network(encryption: &str, password: &str, hidden: bool) -> FieldMap {
        FieldMap::new()
            .with(Field::WifiSsid, "Cafe")
            .with(Field::WifiEncryption, encryption)
            .with(Field::WifiPassword, password)
            .with_flag(Field::WifiHidden, hidden)
    }

    #[test]
    fn test_wpa_with_password() {
        assert_eq!(
            wifi(&network("WPA", "hunter2", false)),
            "WIFI:T:WPA;S:Cafe;P:hunter2;;"
        );
    }

    #[test]
    fn test_hidden_network_appends_flag() {
        assert_eq!(
            wifi(&network("WEP", "abc", true)),
            "WIFI:T:WEP;S:Cafe;P:abc;H:true;;"
        );
    }

    #[test]
    fn test_open_network_drops_password() {
        assert_eq!(
            wifi(&network("nopass", "ignored", false)),
            "WIFI:T:nopass;S:Cafe;;"
        );
        assert_eq!(
            wifi(&network("no-password", "ignored", true)),
            "WIFI:T:no-password;S:Cafe;H:true;;"
        );
    }

    #[test]
    fn test_empty_password_is_omitted() {
        assert_eq!(wifi(&network("WPA", "", false)), "WIFI:T:WPA;S:Cafe;;");
    }

    #[test]
    fn test_ssid_defaults() {
        let fields = FieldMap::new().with(Field::WifiEncryption, "WPA");
        assert_eq!(wifi(&fields), "WIFI:T:WPA;S:WiFi;;");
    }
}
