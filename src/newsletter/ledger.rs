//! Append-only subscriber ledger.
//!
//! One CSV row per accepted subscription, appended to a configured file —
//! the service's stand-in for the marketing team's signup spreadsheet.
//! The file is never rewritten or compacted: rows are only ever added, so
//! the history survives crashes mid-write at worst as one torn final row.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::model::Subscription;

const HEADER: &str = "subscribed_at,name,email";

/// Appends one subscription to the ledger, creating the file (with a
/// header row) on first use.
pub fn record(path: &str, subscription: &Subscription) -> std::io::Result<()> {
    let is_new = !Path::new(path).exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if is_new {
        writeln!(file, "{}", HEADER)?;
    }
    writeln!(
        file,
        "{},{},{}",
        csv_field(&subscription.subscribed_at),
        csv_field(&subscription.name),
        csv_field(&subscription.email)
    )?;
    Ok(())
}

/// Quote a field when it contains a comma, quote, or newline, doubling
/// embedded quotes per the usual CSV convention.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
