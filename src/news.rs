/// News aggregation pipeline.
///
/// Fetches every registered feed, tolerates per-feed failures (one agency
/// being down should never blank the whole news grid), and merges the
/// results into a single newest-first list in the JSON shape the grid
/// consumes. Display concerns — how many cards to show, date formatting —
/// stay on the front end.

use crate::config::FeedConfig;
use crate::feeds::FEED_REGISTRY;
use crate::ingest::rss;
use crate::logging;
use crate::model::NewsItem;

/// Fetch and merge all feeds: the static registry plus any extras from
/// the deployment's feeds file. Failed feeds are logged through the
/// classification path and skipped.
pub fn collect_all(client: &reqwest::blocking::Client, extra: &[FeedConfig]) -> Vec<NewsItem> {
    let mut targets: Vec<(&str, &str)> =
        FEED_REGISTRY.iter().map(|f| (f.id, f.url)).collect();
    targets.extend(extra.iter().map(|f| (f.id.as_str(), f.url.as_str())));

    let mut all = Vec::new();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for &(feed_id, url) in &targets {
        match rss::fetch_feed(client, feed_id, url) {
            Ok(mut items) => {
                logging::debug(
                    logging::Source::Rss,
                    Some(feed_id),
                    &format!("{} items", items.len()),
                );
                successful += 1;
                all.append(&mut items);
            }
            Err(e) => {
                failed += 1;
                logging::log_feed_failure(feed_id, "fetch", &e);
            }
        }
    }

    logging::log_fetch_summary(targets.len(), successful, failed);
    sort_newest_first(&mut all);
    all
}

/// Newest first by publication date. Items whose date cannot be parsed
/// sink to the end; ties keep their fetch order (registry order).
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by_key(|item| std::cmp::Reverse(rss::parse_pub_date(&item.pub_date)));
}

/// The aggregated list as a JSON array, ready to serve.
pub fn to_json(items: &[NewsItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: &str, title: &str, pub_date: &str) -> NewsItem {
        NewsItem {
            source: source.to_string(),
            title: title.to_string(),
            link: format!("https://example.org/{}", title.to_lowercase().replace(' ', "-")),
            pub_date: pub_date.to_string(),
            content_snippet: String::new(),
        }
    }

    #[test]
    fn test_sort_is_newest_first_across_sources() {
        let mut items = vec![
            item("NASA", "Older", "Mon, 02 Jun 2025 10:00:00 GMT"),
            item("JAXA", "Newest", "Thu, 05 Jun 2025 01:00:00 GMT"),
            item("ESA", "Middle", "Tue, 03 Jun 2025 23:59:00 GMT"),
        ];
        sort_newest_first(&mut items);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Newest", "Middle", "Older"]);
    }

    #[test]
    fn test_undated_items_sink_to_the_end() {
        let mut items = vec![
            item("ESA", "Undated", ""),
            item("NASA", "Dated", "Mon, 02 Jun 2025 10:00:00 GMT"),
            item("JAXA", "Garbled", "sometime soon"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(items[0].title, "Dated");
        // The two unsortable items keep their relative order.
        assert_eq!(items[1].title, "Undated");
        assert_eq!(items[2].title, "Garbled");
    }

    #[test]
    fn test_sort_understands_timezone_offsets() {
        // 15:00 +02:00 is 13:00 UTC — earlier than 14:00 GMT.
        let mut items = vec![
            item("ESA", "Later UTC", "Tue, 03 Jun 2025 15:00:00 +0200"),
            item("NASA", "Earlier UTC", "Tue, 03 Jun 2025 14:00:00 GMT"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(items[0].title, "Earlier UTC");
    }

    #[test]
    fn test_to_json_produces_an_array_in_wire_shape() {
        let items = vec![item("NASA", "One", "Mon, 02 Jun 2025 10:00:00 GMT")];
        let json = to_json(&items).expect("items should serialize");
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"pubDate\""));
        assert!(json.contains("\"source\": \"NASA\""));
    }

    #[test]
    fn test_to_json_of_empty_list_is_empty_array() {
        assert_eq!(to_json(&[]).expect("empty list serializes"), "[]");
    }
}
