//! Offline pipeline tests: RSS text → parse → merge → sort → JSON.
//!
//! These exercise the full aggregation path on canned feed documents, so
//! they run without network access. Live-endpoint checks live in
//! `feed_verification.rs`.

use astrophiles_service::ingest::rss;
use astrophiles_service::model::NewsItem;
use astrophiles_service::news;

const NASA_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>NASA Breaking News</title>
    <item>
      <title>Europa Clipper Completes Gravity Assist</title>
      <link>https://www.nasa.gov/europa-clipper-assist</link>
      <pubDate>Wed, 04 Jun 2025 16:45:00 GMT</pubDate>
      <description>The spacecraft swung past Mars on schedule.</description>
    </item>
    <item>
      <title>Artemis II Crew Completes Training</title>
      <link>https://www.nasa.gov/artemis-ii-training</link>
      <pubDate>Tue, 03 Jun 2025 14:00:00 GMT</pubDate>
      <description>Final simulations wrapped at Johnson Space Center.</description>
    </item>
  </channel>
</rss>
"#;

const JAXA_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>JAXA Press Releases</title>
    <item>
      <title><![CDATA[H3 Launch Vehicle Flight Result]]></title>
      <link>https://global.jaxa.jp/press/2025/h3-result</link>
      <pubDate>Thu, 05 Jun 2025 02:10:00 GMT</pubDate>
      <description><![CDATA[<p>JAXA confirms the H3 vehicle reached its target
        orbit and released all payloads nominally.</p>]]></description>
    </item>
  </channel>
</rss>
"#;

fn parse_fixture(xml: &str, feed_id: &str) -> Vec<NewsItem> {
    rss::parse_rss(xml, feed_id).expect("fixture should parse")
}

#[test]
fn test_merged_feeds_sort_newest_first_across_sources() {
    let mut all = parse_fixture(NASA_FIXTURE, "nasa");
    all.extend(parse_fixture(JAXA_FIXTURE, "jaxa"));
    news::sort_newest_first(&mut all);

    let order: Vec<(&str, &str)> = all
        .iter()
        .map(|i| (i.source.as_str(), i.title.as_str()))
        .collect();
    assert_eq!(
        order,
        [
            ("JAXA", "H3 Launch Vehicle Flight Result"),
            ("NASA", "Europa Clipper Completes Gravity Assist"),
            ("NASA", "Artemis II Crew Completes Training"),
        ]
    );
}

#[test]
fn test_aggregated_json_matches_the_front_end_contract() {
    let mut all = parse_fixture(NASA_FIXTURE, "nasa");
    all.extend(parse_fixture(JAXA_FIXTURE, "jaxa"));
    news::sort_newest_first(&mut all);

    let json = news::to_json(&all).expect("aggregated list serializes");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("output is valid JSON");

    let array = parsed.as_array().expect("top level is an array");
    assert_eq!(array.len(), 3);

    // Exactly the fields the news grid reads, in its naming.
    let first = array[0].as_object().expect("items are objects");
    for field in ["source", "title", "link", "pubDate", "contentSnippet"] {
        assert!(first.contains_key(field), "missing field '{}'", field);
    }
    assert_eq!(first["source"], "JAXA");
    assert!(first["contentSnippet"].as_str().unwrap().ends_with("..."));
}

#[test]
fn test_a_dead_feed_does_not_poison_the_merge() {
    // Simulates one agency serving a maintenance page: its parse fails,
    // the other feeds still make it through.
    let dead = rss::parse_rss("<html>503 maintenance</html>", "esa");
    assert!(dead.is_err());

    let mut all = parse_fixture(NASA_FIXTURE, "nasa");
    if let Ok(mut items) = dead {
        all.append(&mut items);
    }
    news::sort_newest_first(&mut all);
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|i| i.source == "NASA"));
}

#[test]
fn test_round_trip_preserves_items_exactly() {
    let items = parse_fixture(JAXA_FIXTURE, "jaxa");
    let json = news::to_json(&items).expect("serializes");
    let back: Vec<NewsItem> = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, items);
}
