/// Feed registry for the space agency news aggregator.
///
/// Defines the canonical list of RSS feeds polled by this service, along
/// with their metadata. This is the single source of truth for feed ids —
/// all other modules should reference feeds from here rather than
/// hardcoding URLs. Deployments can layer extra feeds on top via a TOML
/// file (see `config::load_extra_feeds`).

// ---------------------------------------------------------------------------
// Feed metadata
// ---------------------------------------------------------------------------

/// Metadata for a single agency RSS feed.
pub struct Feed {
    /// Short lowercase tag. Upper-cased it becomes the source label shown
    /// on news cards ("nasa" → "NASA").
    pub id: &'static str,
    /// Human-readable feed name.
    pub name: &'static str,
    /// Feed endpoint. Always https.
    pub url: &'static str,
    /// What the feed carries and why it is in the rotation.
    pub description: &'static str,
}

impl Feed {
    /// The source label attached to every item from this feed.
    pub fn source_label(&self) -> String {
        self.id.to_uppercase()
    }
}

/// All agency feeds polled for the news grid, in display priority order.
pub static FEED_REGISTRY: &[Feed] = &[
    Feed {
        id: "nasa",
        name: "NASA Breaking News",
        url: "https://www.nasa.gov/rss/dyn/breaking_news.rss",
        description: "Primary feed. Mission announcements, launches, and \
                      science results; updates most days.",
    },
    Feed {
        id: "esa",
        name: "ESA Top News",
        url: "https://www.esa.int/rss.xml",
        description: "General ESA feed covering all directorates. Noisier \
                      than the NASA feed; may be narrowed to a per-programme \
                      feed if the grid skews European.",
    },
    Feed {
        id: "jaxa",
        name: "JAXA Press Releases",
        url: "https://global.jaxa.jp/news/rss.xml",
        description: "English-language JAXA releases. Lower volume, \
                      typically a few items per week.",
    },
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Returns the ids of all registered feeds, suitable for iteration or
/// summary logging.
pub fn all_feed_ids() -> Vec<&'static str> {
    FEED_REGISTRY.iter().map(|f| f.id).collect()
}

/// Looks up a feed by id. Returns `None` if not registered.
pub fn find_feed(id: &str) -> Option<&'static Feed> {
    FEED_REGISTRY.iter().find(|f| f.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_ids_are_lowercase_ascii_tags() {
        // The id doubles as the news card source label (upper-cased), so
        // it must be a plain ascii word.
        for feed in FEED_REGISTRY {
            assert!(
                !feed.id.is_empty() && feed.id.chars().all(|c| c.is_ascii_lowercase()),
                "feed id '{}' should be a lowercase ascii tag",
                feed.id
            );
        }
    }

    #[test]
    fn test_no_duplicate_feed_ids() {
        let mut seen = std::collections::HashSet::new();
        for feed in FEED_REGISTRY {
            assert!(seen.insert(feed.id), "duplicate feed id '{}' in FEED_REGISTRY", feed.id);
        }
    }

    #[test]
    fn test_feed_urls_are_https() {
        for feed in FEED_REGISTRY {
            assert!(
                feed.url.starts_with("https://"),
                "feed '{}' should use https, got '{}'",
                feed.id,
                feed.url
            );
        }
    }

    #[test]
    fn test_registry_contains_all_expected_agencies() {
        for expected in ["nasa", "esa", "jaxa"] {
            assert!(
                find_feed(expected).is_some(),
                "FEED_REGISTRY missing expected feed '{}'",
                expected
            );
        }
    }

    #[test]
    fn test_find_feed_returns_correct_entry() {
        let feed = find_feed("nasa").expect("nasa should be in registry");
        assert_eq!(feed.id, "nasa");
        assert!(feed.name.contains("NASA"));
    }

    #[test]
    fn test_find_feed_returns_none_for_unknown_id() {
        assert!(find_feed("roscosmos").is_none());
    }

    #[test]
    fn test_source_label_is_upper_cased_id() {
        let feed = find_feed("jaxa").expect("jaxa should be in registry");
        assert_eq!(feed.source_label(), "JAXA");
    }

    #[test]
    fn test_all_feed_ids_helper_matches_registry_length() {
        assert_eq!(all_feed_ids().len(), FEED_REGISTRY.len());
    }
}
