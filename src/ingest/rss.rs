/// RSS client for the space agency news feeds.
///
/// Fetches a feed over HTTP and extracts its `<item>` elements into
/// `NewsItem`s. The agency feeds are plain RSS 2.0, so the extraction is
/// a small hand-rolled tag scan: find each item block, pull the handful
/// of child elements the news grid renders, unwrap CDATA, decode
/// entities, and strip residual markup from descriptions. Feeds that
/// need more than that (Atom, namespaced extensions) are out of scope
/// for the rotation.

use chrono::{DateTime, FixedOffset};

use crate::model::{NewsError, NewsItem};

/// Card snippet length, in characters. Matches what the news grid can
/// show without clipping.
const SNIPPET_MAX_CHARS: usize = 150;

// ============================================================================
// Fetching
// ============================================================================

/// Fetch one feed and parse its items.
///
/// # Parameters
/// - `client`: HTTP client
/// - `feed_id`: registry id, e.g. "nasa"; upper-cased into the source label
/// - `url`: feed endpoint
pub fn fetch_feed(
    client: &reqwest::blocking::Client,
    feed_id: &str,
    url: &str,
) -> Result<Vec<NewsItem>, NewsError> {
    let response = client
        .get(url)
        .header("Accept", "application/rss+xml, application/xml, text/xml")
        .send()
        .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::HttpError(status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

    parse_rss(&body, feed_id)
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse an RSS document into news items.
///
/// Items without a title or link are skipped — the grid cannot render
/// them. A document that yields no usable items at all is an error so
/// the aggregator can classify and log it per feed.
pub fn parse_rss(xml: &str, feed_id: &str) -> Result<Vec<NewsItem>, NewsError> {
    let source = feed_id.to_uppercase();
    let mut items = Vec::new();

    for block in item_blocks(xml) {
        let title = extract_element(block, "title").map(|t| decode_entities(&t));
        let link = extract_element(block, "link").map(|l| decode_entities(&l));
        let (Some(title), Some(link)) = (title, link) else { continue };
        if title.is_empty() || link.is_empty() {
            continue;
        }

        let pub_date = extract_element(block, "pubDate").unwrap_or_default();
        let content_snippet = extract_element(block, "description")
            .map(|d| snippet(&d))
            .unwrap_or_default();

        items.push(NewsItem {
            source: source.clone(),
            title,
            link,
            pub_date,
            content_snippet,
        });
    }

    if items.is_empty() {
        return Err(NewsError::NoItems(feed_id.to_string()));
    }
    Ok(items)
}

/// Publication timestamps in the agency feeds are RFC 2822
/// ("Tue, 03 Jun 2025 14:00:00 GMT"); some syndication tools emit
/// RFC 3339 instead, so both are accepted. Returns `None` for anything
/// else — callers treat undated items as oldest.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
}

// ----------------------------------------------------------------------------
// Tag scanning
// ----------------------------------------------------------------------------

/// The inner text of every `<item>...</item>` block, in document order.
/// Searching inside blocks only keeps channel-level `<title>`/`<link>`
/// elements out of the results.
fn item_blocks(xml: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut cursor = xml;
    while let Some(open_at) = cursor.find("<item") {
        let tail = &cursor[open_at + "<item".len()..];
        // Reject lookalike tags such as <itemref>.
        let is_item = matches!(tail.as_bytes().first(), Some(b'>' | b' ' | b'\t' | b'\r' | b'\n'));
        if !is_item {
            cursor = tail;
            continue;
        }
        let Some(body_at) = tail.find('>') else { break };
        let body = &tail[body_at + 1..];
        let Some(close_at) = body.find("</item>") else { break };
        blocks.push(&body[..close_at]);
        cursor = &body[close_at + "</item>".len()..];
    }
    blocks
}

/// The trimmed inner text of the first `<tag>` element in `block`, with
/// any CDATA wrapper removed. `None` when the element is absent or
/// unterminated.
fn extract_element(block: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let open_at = block.find(&open)?;
    let after_open = &block[open_at + open.len()..];
    let body_at = after_open.find('>')?;
    let body = &after_open[body_at + 1..];
    let close_at = body.find(&close)?;

    Some(unwrap_cdata(body[..close_at].trim()).trim().to_string())
}

fn unwrap_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text)
}

/// Decode the predefined XML entities plus numeric character references.
/// Unrecognized entities pass through verbatim.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
            }
            _ if entity.starts_with('#') => {
                entity[1..].parse::<u32>().ok().and_then(char::from_u32)
            }
            _ => None,
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop markup, keeping only text content. Descriptions in the agency
/// feeds routinely embed paragraph and image tags.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Card snippet: markup stripped, entities decoded, whitespace collapsed,
/// cut to `SNIPPET_MAX_CHARS` characters with a trailing ellipsis.
/// Empty descriptions yield an empty snippet with no ellipsis.
fn snippet(description: &str) -> String {
    let text = decode_entities(&strip_tags(description));
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return String::new();
    }
    let mut cut: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
    cut.push_str("...");
    cut
}

// ============================================================================
// Tests
// ============================================================================
