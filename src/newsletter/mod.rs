//! Newsletter subscription pipeline.
//!
//! Validate → record → notify → confirm, with the tolerance rules the
//! signup flow depends on: ledger and admin-notification failures are
//! logged but never lose a subscription, while a failed confirmation
//! send is the pipeline's failure. Missing SMTP credentials degrade to
//! accepting the subscription without sending anything.

pub mod ledger;
pub mod smtp;
pub mod validate;

use chrono::{DateTime, Utc};

use crate::config::SmtpSettings;
use crate::logging::{self, Source};
use crate::model::{SubscribeError, Subscription};

/// What the caller should tell the subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// Recorded and confirmation email delivered.
    Confirmed,
    /// Recorded, but no email sent because SMTP is not configured.
    ReceivedUnsent,
}

impl SubscribeOutcome {
    /// User-facing result message.
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::Confirmed => {
                "Thank you for subscribing! Check your email for confirmation."
            }
            SubscribeOutcome::ReceivedUnsent => {
                "Subscription received (email sending not configured)"
            }
        }
    }
}

/// Runs the full subscription pipeline for one form submission.
///
/// `now` is injected rather than read from the clock so the recorded
/// timestamp is deterministic in tests.
pub fn process_subscription(
    name: &str,
    email: &str,
    settings: &SmtpSettings,
    ledger_path: Option<&str>,
    now: DateTime<Utc>,
) -> Result<SubscribeOutcome, SubscribeError> {
    validate::validate(name, email)?;
    let name = name.trim();
    let email = email.trim();
    let subscription = Subscription::new(name, email, now);

    // Record first: a signup must survive even if every send below fails.
    match ledger_path {
        Some(path) => {
            if let Err(e) = ledger::record(path, &subscription) {
                logging::log_ledger_failure(path, &e);
            }
        }
        None => logging::info(
            Source::Ledger,
            None,
            &format!("new subscription: {} <{}>", name, email),
        ),
    }

    if !settings.is_configured() {
        logging::error(
            Source::Smtp,
            None,
            "SMTP credentials not configured; subscription recorded without confirmation email",
        );
        return Ok(SubscribeOutcome::ReceivedUnsent);
    }

    let mailer = smtp::build_mailer(settings)?;

    if let Err(e) = smtp::send_admin_notification(
        &mailer,
        settings,
        name,
        email,
        &subscription.subscribed_at,
    ) {
        logging::log_smtp_failure("admin notification", &e);
    }

    smtp::send_confirmation(&mailer, settings, name, email)?;
    logging::info(Source::Smtp, None, &format!("confirmation sent to {}", email));
    Ok(SubscribeOutcome::Confirmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
