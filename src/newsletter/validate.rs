//! Subscription form validation.
//!
//! The signup form checks these client-side too, but the function is the
//! trust boundary: everything that reaches the SMTP dispatcher or the
//! ledger has passed through here first.

use crate::model::SubscribeError;

/// Validates a raw form submission. Both fields are required; the email
/// must pass the shape check. Returns the first problem found.
pub fn validate(name: &str, email: &str) -> Result<(), SubscribeError> {
    if name.trim().is_empty() {
        return Err(SubscribeError::MissingField("name"));
    }
    if email.trim().is_empty() {
        return Err(SubscribeError::MissingField("email"));
    }
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(SubscribeError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Shape check only: no whitespace, exactly one `@`, a non-empty local
/// part, and a domain with an interior dot. Deliverability is the SMTP
/// server's problem, not ours.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Accepted ----------------------------------------------------------

    #[test]
    fn test_ordinary_addresses_are_accepted() {
        for email in [
            "ada@example.com",
            "a.lovelace+news@example.co.uk",
            "x@sub.domain.org",
        ] {
            assert!(is_valid_email(email), "'{}' should be accepted", email);
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert_eq!(validate("Ada Lovelace", "ada@example.com"), Ok(()));
    }

    #[test]
    fn test_fields_are_trimmed_before_checking() {
        assert_eq!(validate("  Ada  ", "  ada@example.com  "), Ok(()));
    }

    // --- Rejected ----------------------------------------------------------

    #[test]
    fn test_malformed_addresses_are_rejected() {
        for email in [
            "plainaddress",
            "two@@example.com",
            "a@b@c.com",
            "@example.com",
            "ada@nodot",
            "ada@.leadingdot.com",
            "ada@trailingdot.",
            "spaced out@example.com",
        ] {
            assert!(!is_valid_email(email), "'{}' should be rejected", email);
        }
    }

    #[test]
    fn test_missing_name_is_reported_first() {
        assert_eq!(validate("", "ada@example.com"), Err(SubscribeError::MissingField("name")));
        assert_eq!(validate("   ", "ada@example.com"), Err(SubscribeError::MissingField("name")));
    }

    #[test]
    fn test_missing_email_is_reported() {
        assert_eq!(validate("Ada", ""), Err(SubscribeError::MissingField("email")));
    }

    #[test]
    fn test_invalid_email_carries_the_offending_value() {
        assert_eq!(
            validate("Ada", "not-an-email"),
            Err(SubscribeError::InvalidEmail("not-an-email".to_string()))
        );
    }
}
