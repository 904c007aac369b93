//! Social profile and app store links

use crate::fields::{Field, FieldSource};

/// Platform key that passes the raw input through as a full URL.
const CUSTOM_PLATFORM: &str = "custom";

const SOCIAL_CUSTOM_DEFAULT: &str = "https://example.com";
const APP_CUSTOM_DEFAULT: &str = "https://example.com/app";

/// Profile URL prefixes; the username is appended verbatim.
pub const SOCIAL_PROFILES: &[(&str, &str)] = &[
    ("facebook", "https://facebook.com/"),
    ("twitter", "https://twitter.com/"),
    ("instagram", "https://instagram.com/"),
    ("linkedin", "https://linkedin.com/in/"),
    ("youtube", "https://youtube.com/@"),
    ("tiktok", "https://tiktok.com/@"),
    ("github", "https://github.com/"),
];

/// Store listing URL prefixes; the app id is appended verbatim.
pub const APP_STORES: &[(&str, &str)] = &[
    ("ios", "https://apps.apple.com/app/id"),
    ("android", "https://play.google.com/store/apps/details?id="),
    ("windows", "https://www.microsoft.com/store/apps/"),
    ("amazon", "https://www.amazon.com/gp/product/"),
];

fn lookup(table: &[(&str, &'static str)], platform: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == platform)
        .map(|(_, prefix)| *prefix)
}

/// Profile URL for `social-platform` / `social-username`.
///
/// Unknown platforms become `https://<platform>.com/<username>`.
pub fn social(fields: &dyn FieldSource) -> String {
    let platform = fields.value(Field::SocialPlatform);
    let username = fields.value(Field::SocialUsername);

    if platform == CUSTOM_PLATFORM {
        return non_empty_or(username, SOCIAL_CUSTOM_DEFAULT);
    }

    match lookup(SOCIAL_PROFILES, &platform) {
        Some(prefix) => format!("{prefix}{username}"),
        None => {
            tracing::debug!(%platform, "Unknown social platform, using generic profile URL");
            format!("https://{platform}.com/{username}")
        }
    }
}

/// Store listing URL for `app-platform` / `app-id`.
///
/// Unknown platforms become `https://store.<platform>.com/app/<id>`.
pub fn app(fields: &dyn FieldSource) -> String {
    let platform = fields.value(Field::AppPlatform);
    let app_id = fields.value(Field::AppId);

    if platform == CUSTOM_PLATFORM {
        return non_empty_or(app_id, APP_CUSTOM_DEFAULT);
    }

    match lookup(APP_STORES, &platform) {
        Some(prefix) => format!("{prefix}{app_id}"),
        None => {
            tracing::debug!(%platform, "Unknown app store, using generic store URL");
            format!("https://store.{platform}.com/app/{app_id}")
        }
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    fn social_for(platform: &str, username: &str) -> String {
        social(
            &FieldMap::new()
                .with(Field::SocialPlatform, platform)
                .with(Field::SocialUsername, username),
        )
    }

    fn app_for(platform: &str, id: &str) -> String {
        app(&FieldMap::new()
            .with(Field::AppPlatform, platform)
            .with(Field::AppId, id))
    }

    #[test]
    fn test_social_fixed_table() {
        let cases = [
            ("facebook", "https://facebook.com/ferris"),
            ("twitter", "https://twitter.com/ferris"),
            ("instagram", "https://instagram.com/ferris"),
            ("linkedin", "https://linkedin.com/in/ferris"),
            ("youtube", "https://youtube.com/@ferris"),
            ("tiktok", "https://tiktok.com/@ferris"),
            ("github", "https://github.com/ferris"),
        ];
        for (platform, url) in cases {
            assert_eq!(social_for(platform, "ferris"), url);
        }
    }

    #[test]
    fn test_social_custom_and_fallback() {
        assert_eq!(
            social_for("custom", "https://ferris.rs/me"),
            "https://ferris.rs/me"
        );
        assert_eq!(social_for("custom", ""), "https://example.com");
        assert_eq!(social_for("mastodon", "ferris"), "https://mastodon.com/ferris");
    }

    #[test]
    fn test_app_fixed_table() {
        assert_eq!(app_for("ios", "123456"), "https://apps.apple.com/app/id123456");
        assert_eq!(
            app_for("android", "com.example.app"),
            "https://play.google.com/store/apps/details?id=com.example.app"
        );
        assert_eq!(
            app_for("windows", "9NBLGGH"),
            "https://www.microsoft.com/store/apps/9NBLGGH"
        );
        assert_eq!(
            app_for("amazon", "B00X"),
            "https://www.amazon.com/gp/product/B00X"
        );
    }

    #[test]
    fn test_app_custom_and_fallback() {
        assert_eq!(app_for("custom", ""), "https://example.com/app");
        assert_eq!(app_for("custom", "https://x.y/z"), "https://x.y/z");
        assert_eq!(app_for("huawei", "C1"), "https://store.huawei.com/app/C1");
    }
}
