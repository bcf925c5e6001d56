/// Core data types for the Astrophiles backend service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no external calls — only types, constructors, and
/// error display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// News types
// ---------------------------------------------------------------------------

/// A single news entry parsed from one agency RSS feed.
///
/// Corresponds to one `<item>` element, enriched with the source label of
/// the enclosing feed. Serialized field names match the JSON shape the
/// news grid consumes (`pubDate`, `contentSnippet`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Upper-cased feed id, e.g. "NASA".
    pub source: String,
    pub title: String,
    pub link: String,
    /// Verbatim feed value, e.g. "Tue, 03 Jun 2025 14:00:00 GMT".
    /// Parsed only when sorting; kept as text on the wire.
    pub pub_date: String,
    /// Plain-text description truncated for card display. Empty when the
    /// item carried no description.
    pub content_snippet: String,
}

// ---------------------------------------------------------------------------
// Subscription types
// ---------------------------------------------------------------------------

/// A validated newsletter signup, timestamped at acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub name: String,
    pub email: String,
    /// RFC 3339 acceptance time.
    pub subscribed_at: String,
}

impl Subscription {
    /// Callers pass the acceptance instant explicitly so the pipeline stays
    /// deterministic in tests.
    pub fn new(name: &str, email: &str, at: DateTime<Utc>) -> Self {
        Subscription {
            name: name.to_string(),
            email: email.to_string(),
            subscribed_at: at.to_rfc3339(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or parsing an agency news feed.
#[derive(Debug, PartialEq)]
pub enum NewsError {
    /// Non-2xx HTTP response from the feed endpoint.
    HttpError(u16),
    /// The request itself failed (DNS, TLS, timeout).
    RequestFailed(String),
    /// The response body was not usable RSS.
    ParseError(String),
    /// The feed parsed but contained no renderable items
    /// (every item missing a title or link, or an empty channel).
    NoItems(String),
}

impl std::fmt::Display for NewsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsError::HttpError(code) => write!(f, "HTTP error: {}", code),
            NewsError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            NewsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            NewsError::NoItems(feed) => write!(f, "No items in feed: {}", feed),
        }
    }
}

impl std::error::Error for NewsError {}

/// Errors that can arise in the newsletter subscription pipeline.
#[derive(Debug, PartialEq)]
pub enum SubscribeError {
    /// A required form field was empty.
    MissingField(&'static str),
    /// The email failed the shape check.
    InvalidEmail(String),
    /// Building or sending mail failed.
    Smtp(String),
}

impl std::fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscribeError::MissingField(field) => write!(f, "Missing required field: {}", field),
            SubscribeError::InvalidEmail(email) => write!(f, "Invalid email format: {}", email),
            SubscribeError::Smtp(msg) => write!(f, "SMTP error: {}", msg),
        }
    }
}

impl std::error::Error for SubscribeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_news_item_serializes_to_front_end_field_names() {
        let item = NewsItem {
            source: "NASA".to_string(),
            title: "Artemis Update".to_string(),
            link: "https://www.nasa.gov/artemis".to_string(),
            pub_date: "Tue, 03 Jun 2025 14:00:00 GMT".to_string(),
            content_snippet: "NASA shared...".to_string(),
        };
        let json = serde_json::to_string(&item).expect("NewsItem should serialize");
        assert!(json.contains("\"pubDate\""), "pub_date must serialize as pubDate: {}", json);
        assert!(
            json.contains("\"contentSnippet\""),
            "content_snippet must serialize as contentSnippet: {}",
            json
        );
        assert!(!json.contains("pub_date"), "snake_case must not leak onto the wire");
    }

    #[test]
    fn test_subscription_timestamp_is_rfc3339() {
        let at = Utc.with_ymd_and_hms(2025, 12, 4, 9, 30, 0).unwrap();
        let sub = Subscription::new("Ada", "ada@example.com", at);
        assert_eq!(sub.subscribed_at, "2025-12-04T09:30:00+00:00");
    }

    #[test]
    fn test_error_display_is_descriptive() {
        assert_eq!(NewsError::HttpError(503).to_string(), "HTTP error: 503");
        assert_eq!(
            NewsError::NoItems("jaxa".to_string()).to_string(),
            "No items in feed: jaxa"
        );
        assert_eq!(
            SubscribeError::MissingField("email").to_string(),
            "Missing required field: email"
        );
    }
}
