/// Feed ingestion clients for the news aggregator.
///
/// Submodules:
/// - `rss` — fetch and parse for the agency RSS 2.0 feeds.

pub mod rss;
