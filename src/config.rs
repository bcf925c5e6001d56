/// Configuration loading for the service.
///
/// SMTP settings come from environment variables (`.env` files are loaded
/// at process start), matching how the deployment target injects secrets.
/// Extra news feeds can be layered on top of the built-in registry via a
/// TOML file.

use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fs;

// ---------------------------------------------------------------------------
// SMTP settings
// ---------------------------------------------------------------------------

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP relay settings. Credentials are optional: an unconfigured relay
/// degrades the newsletter pipeline to record-without-send rather than
/// failing it.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from_email: Option<String>,
    pub admin_email: Option<String>,
}

impl SmtpSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment access is injected so tests can feed a fixed map
    /// without mutating process state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let nonempty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        SmtpSettings {
            host: nonempty(get("SMTP_HOST")).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            // A malformed port falls back to the default rather than
            // refusing to start.
            port: nonempty(get("SMTP_PORT"))
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: nonempty(get("SMTP_USER")),
            pass: nonempty(get("SMTP_PASS")),
            from_email: nonempty(get("FROM_EMAIL")),
            admin_email: nonempty(get("ADMIN_EMAIL")),
        }
    }

    /// True when both credentials are present and sending can be attempted.
    pub fn is_configured(&self) -> bool {
        self.user.is_some() && self.pass.is_some()
    }

    /// Sender address: FROM_EMAIL, falling back to the SMTP user.
    pub fn sender(&self) -> Option<&str> {
        self.from_email.as_deref().or(self.user.as_deref())
    }

    /// Admin notification recipient: ADMIN_EMAIL, falling back to the
    /// sender address.
    pub fn admin_recipient(&self) -> Option<&str> {
        self.admin_email.as_deref().or_else(|| self.sender())
    }
}

/// Path of the append-only subscriber ledger, if one is configured.
pub fn ledger_path() -> Option<String> {
    env::var("SUBSCRIBER_LEDGER").ok().filter(|s| !s.trim().is_empty())
}

/// Path of an extra-feeds TOML file, if one is configured.
pub fn extra_feeds_path() -> Option<String> {
    env::var("ASTRO_FEEDS_FILE").ok().filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Extra feeds file
// ---------------------------------------------------------------------------

/// One feed entry from the extra-feeds TOML file:
///
/// ```toml
/// [[feeds]]
/// id = "spacex"
/// name = "SpaceX Updates"
/// url = "https://www.spacex.com/updates.rss"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedConfig {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ExtraFeedsFile {
    #[serde(default)]
    feeds: Vec<FeedConfig>,
}

/// Parses the extra-feeds TOML text.
pub fn parse_extra_feeds(text: &str) -> Result<Vec<FeedConfig>, toml::de::Error> {
    let parsed: ExtraFeedsFile = toml::from_str(text)?;
    Ok(parsed.feeds)
}

/// Loads extra feeds from a TOML file.
pub fn load_extra_feeds(path: &str) -> Result<Vec<FeedConfig>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_extra_feeds(&text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> SmtpSettings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SmtpSettings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_env_is_empty() {
        let settings = settings_from(&[]);
        assert_eq!(settings.host, DEFAULT_SMTP_HOST);
        assert_eq!(settings.port, DEFAULT_SMTP_PORT);
        assert!(!settings.is_configured());
        assert_eq!(settings.sender(), None);
        assert_eq!(settings.admin_recipient(), None);
    }

    #[test]
    fn test_malformed_port_falls_back_to_default() {
        let settings = settings_from(&[("SMTP_PORT", "not-a-port")]);
        assert_eq!(settings.port, DEFAULT_SMTP_PORT);
    }

    #[test]
    fn test_explicit_settings_are_honored() {
        let settings = settings_from(&[
            ("SMTP_HOST", "mail.example.org"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USER", "bot@example.org"),
            ("SMTP_PASS", "hunter2"),
        ]);
        assert_eq!(settings.host, "mail.example.org");
        assert_eq!(settings.port, 2525);
        assert!(settings.is_configured());
    }

    #[test]
    fn test_sender_falls_back_to_smtp_user() {
        let settings = settings_from(&[("SMTP_USER", "bot@example.org"), ("SMTP_PASS", "x")]);
        assert_eq!(settings.sender(), Some("bot@example.org"));

        let with_from = settings_from(&[
            ("SMTP_USER", "bot@example.org"),
            ("FROM_EMAIL", "news@example.org"),
        ]);
        assert_eq!(with_from.sender(), Some("news@example.org"));
    }

    #[test]
    fn test_admin_recipient_fallback_chain() {
        let settings = settings_from(&[
            ("SMTP_USER", "bot@example.org"),
            ("FROM_EMAIL", "news@example.org"),
            ("ADMIN_EMAIL", "admin@example.org"),
        ]);
        assert_eq!(settings.admin_recipient(), Some("admin@example.org"));

        let without_admin = settings_from(&[("SMTP_USER", "bot@example.org")]);
        assert_eq!(without_admin.admin_recipient(), Some("bot@example.org"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let settings = settings_from(&[("SMTP_USER", "  "), ("SMTP_PASS", "")]);
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_parse_extra_feeds() {
        let text = r#"
            [[feeds]]
            id = "spacex"
            name = "SpaceX Updates"
            url = "https://www.spacex.com/updates.rss"

            [[feeds]]
            id = "isro"
            name = "ISRO Press"
            url = "https://www.isro.gov.in/press.rss"
        "#;
        let feeds = parse_extra_feeds(text).expect("valid TOML should parse");
        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].id, "spacex");
        assert_eq!(feeds[1].url, "https://www.isro.gov.in/press.rss");
    }

    #[test]
    fn test_parse_extra_feeds_empty_file_means_no_feeds() {
        assert_eq!(parse_extra_feeds("").expect("empty file is valid"), vec![]);
    }

    #[test]
    fn test_parse_extra_feeds_rejects_wrong_shape() {
        assert!(parse_extra_feeds("[[feeds]]\nid = 42").is_err());
    }
}
