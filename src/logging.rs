/// Structured logging for the Astrophiles backend service.
///
/// Provides context-rich logging with source tags (which feed, which
/// subsystem), timestamps, and severity levels. Supports both console
/// output and file-based logging for unattended runs.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Rss,
    Smtp,
    Ledger,
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Rss => write!(f, "RSS"),
            Source::Smtp => write!(f, "SMTP"),
            Source::Ledger => write!(f, "LEDGER"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - a feed may be briefly empty or rate-limited
    Expected,
    /// Unexpected failure - indicates service degradation or a broken endpoint
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: &Source, tag: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let tag_part = tag.map(|t| format!(" [{}]", t)).unwrap_or_default();
        let log_entry = format!("{} {} {}{}: {}", timestamp, level, source, tag_part, message);

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info => println!("{}", log_entry),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, tag_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, tag_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Log a general informational message
pub fn info(source: Source, tag: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, &source, tag, message);
    }
}

/// Log a warning message
pub fn warn(source: Source, tag: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, &source, tag, message);
    }
}

/// Log an error message
pub fn error(source: Source, tag: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, &source, tag, message);
    }
}

/// Log a debug message
pub fn debug(source: Source, tag: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, &source, tag, message);
    }
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a feed failure based on the error message and context
pub fn classify_feed_failure(_feed_id: &str, error_message: &str) -> FailureType {
    // An empty feed usually means the agency cleared its channel between
    // publications; it recovers on its own.
    if error_message.contains("No items in feed") {
        FailureType::Expected
    }
    // HTTP errors might indicate an endpoint move or an outage
    else if error_message.contains("HTTP error") {
        FailureType::Unexpected
    }
    // Parse errors suggest the feed format changed
    else if error_message.contains("Parse error") {
        FailureType::Unexpected
    }
    // Transport failures could be either side's network
    else if error_message.contains("Request failed") {
        FailureType::Unknown
    } else {
        FailureType::Unknown
    }
}

/// Classify an SMTP failure
pub fn classify_smtp_failure(error_message: &str) -> FailureType {
    let lowered = error_message.to_lowercase();
    if lowered.contains("auth") || lowered.contains("credential") {
        FailureType::Unexpected
    } else if lowered.contains("timeout") || lowered.contains("connection") {
        FailureType::Unknown
    } else {
        FailureType::Unknown
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a feed failure with automatic classification
pub fn log_feed_failure(feed_id: &str, operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_feed_failure(feed_id, &error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(Source::Rss, Some(feed_id), &message),
        FailureType::Unexpected => error(Source::Rss, Some(feed_id), &message),
        FailureType::Unknown => warn(Source::Rss, Some(feed_id), &message),
    }
}

/// Log an SMTP failure with classification
pub fn log_smtp_failure(operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_smtp_failure(&error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Unexpected => error(Source::Smtp, None, &message),
        _ => warn(Source::Smtp, None, &message),
    }
}

/// Log a ledger write failure. Always a warning: the subscription itself
/// still went through.
pub fn log_ledger_failure(path: &str, err: &dyn std::error::Error) {
    warn(Source::Ledger, Some(path), &format!("append failed: {}", err));
}

// ---------------------------------------------------------------------------
// Fetch Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a full aggregation pass
pub fn log_fetch_summary(total: usize, successful: usize, failed: usize) {
    let message = format!(
        "Fetch complete: {}/{} feeds successful, {} failed",
        successful, total, failed
    );

    if failed == 0 {
        info(Source::Rss, None, &message);
    } else if successful == 0 {
        error(Source::Rss, None, &message);
    } else {
        warn(Source::Rss, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_feed_failure_classification() {
        let empty_feed = "No items in feed: esa";
        assert_eq!(classify_feed_failure("esa", empty_feed), FailureType::Expected);

        let http_error = "HTTP error: 500";
        assert_eq!(classify_feed_failure("nasa", http_error), FailureType::Unexpected);

        let transport = "Request failed: connection reset by peer";
        assert_eq!(classify_feed_failure("jaxa", transport), FailureType::Unknown);
    }

    #[test]
    fn test_smtp_failure_classification() {
        assert_eq!(
            classify_smtp_failure("SMTP error: authentication failed"),
            FailureType::Unexpected
        );
        assert_eq!(
            classify_smtp_failure("SMTP error: connection refused"),
            FailureType::Unknown
        );
    }
}
