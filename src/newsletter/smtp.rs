//! SMTP dispatch for subscription emails.
//!
//! Two messages per signup: a confirmation to the subscriber and a
//! notification to the site admin. Bodies are built as plain-text plus
//! HTML alternatives so the welcome mail renders in both graphical and
//! text clients.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpSettings;
use crate::model::SubscribeError;

/// Display name on outgoing mail.
const SENDER_NAME: &str = "Astrophiles";

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Builds a STARTTLS relay from configured settings. Callers must check
/// `settings.is_configured()` first; missing credentials here are a
/// programming error surfaced as `Smtp`.
pub fn build_mailer(settings: &SmtpSettings) -> Result<SmtpTransport, SubscribeError> {
    let (Some(user), Some(pass)) = (settings.user.as_deref(), settings.pass.as_deref()) else {
        return Err(SubscribeError::Smtp("SMTP credentials not configured".to_string()));
    };

    let mailer = SmtpTransport::starttls_relay(&settings.host)
        .map_err(|e| SubscribeError::Smtp(e.to_string()))?
        .port(settings.port)
        .credentials(Credentials::new(user.to_string(), pass.to_string()))
        .build();
    Ok(mailer)
}

fn sender_mailbox(settings: &SmtpSettings) -> Result<Mailbox, SubscribeError> {
    let from = settings
        .sender()
        .ok_or_else(|| SubscribeError::Smtp("No sender address configured".to_string()))?;
    format!("{} <{}>", SENDER_NAME, from)
        .parse()
        .map_err(|e| SubscribeError::Smtp(format!("Bad sender address '{}': {}", from, e)))
}

fn parse_recipient(email: &str) -> Result<Mailbox, SubscribeError> {
    email
        .parse()
        .map_err(|e| SubscribeError::Smtp(format!("Bad recipient address '{}': {}", email, e)))
}

// ---------------------------------------------------------------------------
// Confirmation email
// ---------------------------------------------------------------------------

/// Sends the welcome mail to a new subscriber.
pub fn send_confirmation(
    mailer: &SmtpTransport,
    settings: &SmtpSettings,
    name: &str,
    email: &str,
) -> Result<(), SubscribeError> {
    let message = Message::builder()
        .from(sender_mailbox(settings)?)
        .to(parse_recipient(email)?)
        .subject("Thank You for Subscribing to Astrophiles Newsletter!")
        .multipart(MultiPart::alternative_plain_html(
            confirmation_text(name),
            confirmation_html(name),
        ))
        .map_err(|e| SubscribeError::Smtp(e.to_string()))?;

    mailer.send(&message).map_err(|e| SubscribeError::Smtp(e.to_string()))?;
    Ok(())
}

pub(crate) fn confirmation_text(name: &str) -> String {
    format!(
        "Welcome to Astrophiles!\n\
         \n\
         Dear {},\n\
         \n\
         Thank you for subscribing to our newsletter! We're thrilled to have you \
         join our cosmic community.\n\
         \n\
         You'll now receive:\n\
         - Latest space news and discoveries\n\
         - Astronomical events and viewing opportunities\n\
         - Fascinating articles about the universe\n\
         - Updates on space missions and research\n\
         \n\
         Get ready to explore the wonders of the universe with us!\n\
         \n\
         Clear skies and happy stargazing!\n\
         \n\
         Best regards,\n\
         The Astrophiles Team\n\
         Exploring the cosmos together\n",
        name
    )
}

pub(crate) fn confirmation_html(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
    body {{
        font-family: Arial, sans-serif;
        line-height: 1.6;
        max-width: 600px;
        margin: 0 auto;
        padding: 20px;
        background: linear-gradient(to bottom, #020617, #0f172a);
        color: #cbd5e1;
    }}
    .container {{
        background: rgba(30, 41, 59, 0.8);
        padding: 30px;
        border-radius: 10px;
        border: 1px solid rgba(99, 102, 241, 0.3);
    }}
    h1 {{
        color: #6366f1;
        text-align: center;
    }}
    .footer {{
        margin-top: 30px;
        padding-top: 20px;
        border-top: 1px solid rgba(99, 102, 241, 0.3);
        text-align: center;
        font-size: 0.9em;
        color: #94a3b8;
    }}
</style>
</head>
<body>
<div class="container">
    <h1>Welcome to Astrophiles!</h1>
    <p>Dear {},</p>
    <p>Thank you for subscribing to our newsletter! We're thrilled to have you join our cosmic community.</p>
    <p>You'll now receive:</p>
    <ul>
        <li>Latest space news and discoveries</li>
        <li>Astronomical events and viewing opportunities</li>
        <li>Fascinating articles about the universe</li>
        <li>Updates on space missions and research</li>
    </ul>
    <p>Get ready to explore the wonders of the universe with us!</p>
    <p>Clear skies and happy stargazing!</p>
    <div class="footer">
        <p>Best regards,<br>The Astrophiles Team</p>
        <p>Exploring the cosmos together</p>
    </div>
</div>
</body>
</html>
"#,
        name
    )
}

// ---------------------------------------------------------------------------
// Admin notification
// ---------------------------------------------------------------------------

/// Tells the site admin about a new signup. Callers treat failures here
/// as non-fatal — the subscriber's confirmation matters more.
pub fn send_admin_notification(
    mailer: &SmtpTransport,
    settings: &SmtpSettings,
    name: &str,
    email: &str,
    subscribed_at: &str,
) -> Result<(), SubscribeError> {
    let Some(admin) = settings.admin_recipient() else {
        // Nothing configured and no fallback: skip quietly.
        return Ok(());
    };

    let message = Message::builder()
        .from(sender_mailbox(settings)?)
        .to(parse_recipient(admin)?)
        .subject(admin_subject(name))
        .multipart(MultiPart::alternative_plain_html(
            admin_text(name, email, subscribed_at),
            admin_html(name, email, subscribed_at),
        ))
        .map_err(|e| SubscribeError::Smtp(e.to_string()))?;

    mailer.send(&message).map_err(|e| SubscribeError::Smtp(e.to_string()))?;
    Ok(())
}

pub(crate) fn admin_subject(name: &str) -> String {
    format!("New Newsletter Subscription: {}", name)
}

pub(crate) fn admin_text(name: &str, email: &str, subscribed_at: &str) -> String {
    format!(
        "New Newsletter Subscription\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Subscribed at: {}\n",
        name, email, subscribed_at
    )
}

pub(crate) fn admin_html(name: &str, email: &str, subscribed_at: &str) -> String {
    format!(
        "<h2>New Newsletter Subscription</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subscribed at:</strong> {}</p>\n",
        name, email, subscribed_at
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
