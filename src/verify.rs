//! Data Source Verification Module
//!
//! Framework for testing the configured news feeds and the SMTP relay
//! against their live endpoints, to determine which feeds are reachable
//! and returning parseable items. Use this before adding new feeds to
//! the rotation, and after an agency redesigns its site.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;

use crate::config::{self, SmtpSettings};
use crate::feeds::FEED_REGISTRY;
use crate::ingest::rss;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub feed_results: Vec<FeedVerification>,
    pub smtp: SmtpVerification,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub feeds_total: usize,
    pub feeds_working: usize,
    pub feeds_failed: usize,
    pub smtp_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedVerification {
    pub feed_id: String,
    pub name: String,
    pub status: VerificationStatus,
    pub http_ok: bool,
    pub item_count: usize,
    /// Items whose pubDate parsed — undated items still render but sort last.
    pub items_with_dates: usize,
    pub items_with_snippets: usize,
    pub error_message: Option<String>,
}

/// SMTP is verified by configuration inspection only. No probe mail is
/// sent — relays tend to throttle or flag accounts that send test
/// traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpVerification {
    pub configured: bool,
    pub host: String,
    pub port: u16,
    pub sender_set: bool,
    pub admin_set: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Feed Verification
// ============================================================================

pub fn verify_feed(
    client: &reqwest::blocking::Client,
    feed_id: &str,
    name: &str,
    url: &str,
) -> FeedVerification {
    let mut result = FeedVerification {
        feed_id: feed_id.to_string(),
        name: name.to_string(),
        status: VerificationStatus::Failed,
        http_ok: false,
        item_count: 0,
        items_with_dates: 0,
        items_with_snippets: 0,
        error_message: None,
    };

    match client.get(url).timeout(Duration::from_secs(10)).send() {
        Ok(response) => {
            if response.status().is_success() {
                result.http_ok = true;
                match response.text() {
                    Ok(body) => match rss::parse_rss(&body, feed_id) {
                        Ok(items) => {
                            result.item_count = items.len();
                            result.items_with_dates = items
                                .iter()
                                .filter(|i| rss::parse_pub_date(&i.pub_date).is_some())
                                .count();
                            result.items_with_snippets =
                                items.iter().filter(|i| !i.content_snippet.is_empty()).count();
                        }
                        Err(e) => {
                            result.error_message = Some(e.to_string());
                        }
                    },
                    Err(e) => {
                        result.error_message = Some(format!("Failed to read body: {}", e));
                    }
                }
            } else {
                result.error_message = Some(format!("HTTP {}", response.status()));
            }
        }
        Err(e) => {
            result.error_message = Some(format!("Request failed: {}", e));
        }
    }

    // Determine status
    if result.http_ok && result.item_count > 0 {
        if result.items_with_dates == result.item_count {
            result.status = VerificationStatus::Success;
        } else {
            result.status = VerificationStatus::PartialSuccess;
        }
    }

    result
}

// ============================================================================
// SMTP Verification
// ============================================================================

pub fn verify_smtp(settings: &SmtpSettings) -> SmtpVerification {
    SmtpVerification {
        configured: settings.is_configured(),
        host: settings.host.clone(),
        port: settings.port,
        sender_set: settings.sender().is_some(),
        admin_set: settings.admin_recipient().is_some(),
    }
}

// ============================================================================
// Full Verification Runner
// ============================================================================

pub fn run_full_verification() -> Result<VerificationReport, Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let mut feed_results = Vec::new();
    let mut working = 0usize;
    let mut failed = 0usize;

    println!("🔍 Verifying news feeds...");
    for feed in FEED_REGISTRY {
        print!("  {} ... ", feed.id);
        let result = verify_feed(&client, feed.id, feed.name, feed.url);

        match result.status {
            VerificationStatus::Success => {
                println!("✓ OK ({} items)", result.item_count);
                working += 1;
            }
            VerificationStatus::PartialSuccess => {
                println!(
                    "⚠ Partial ({} items, {} undated)",
                    result.item_count,
                    result.item_count - result.items_with_dates
                );
                working += 1;
            }
            VerificationStatus::Failed => {
                println!("✗ FAILED: {}", result.error_message.as_deref().unwrap_or("Unknown"));
                failed += 1;
            }
        }

        feed_results.push(result);
    }

    // Extra feeds from the deployment's feeds file, if any
    if let Some(path) = config::extra_feeds_path() {
        match config::load_extra_feeds(&path) {
            Ok(extra) => {
                for feed in extra {
                    print!("  {} (extra) ... ", feed.id);
                    let result = verify_feed(&client, &feed.id, &feed.name, &feed.url);
                    match result.status {
                        VerificationStatus::Success | VerificationStatus::PartialSuccess => {
                            println!("✓ OK ({} items)", result.item_count);
                            working += 1;
                        }
                        VerificationStatus::Failed => {
                            println!(
                                "✗ FAILED: {}",
                                result.error_message.as_deref().unwrap_or("Unknown")
                            );
                            failed += 1;
                        }
                    }
                    feed_results.push(result);
                }
            }
            Err(e) => {
                println!("⚠ Warning: Could not load extra feeds from {}: {}", path, e);
            }
        }
    }

    println!("\n🔍 Checking SMTP configuration...");
    let smtp = verify_smtp(&SmtpSettings::from_env());
    if smtp.configured {
        println!("  ✓ relay {}:{} with credentials", smtp.host, smtp.port);
    } else {
        println!("  ⚠ not configured — subscriptions will be recorded without email");
    }

    let summary = VerificationSummary {
        feeds_total: feed_results.len(),
        feeds_working: working,
        feeds_failed: failed,
        smtp_configured: smtp.configured,
    };

    Ok(VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        feed_results,
        smtp,
        summary,
    })
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("📊 VERIFICATION SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "News Feeds:   {}/{} working  ({} failed)",
        report.summary.feeds_working, report.summary.feeds_total, report.summary.feeds_failed
    );
    println!(
        "SMTP Relay:   {}",
        if report.summary.smtp_configured { "configured" } else { "NOT configured" }
    );
    println!();

    let success_rate = if report.summary.feeds_total > 0 {
        (report.summary.feeds_working as f64 / report.summary.feeds_total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Feed Success Rate: {:.1}% ({}/{})",
        success_rate, report.summary.feeds_working, report.summary.feeds_total
    );
    println!("═══════════════════════════════════════════════════════════");
}

// ============================================================================
// Tests
// ============================================================================
