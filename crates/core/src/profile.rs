//! Account profile rules: username format and change cadence, email and
//! display-name validation.

use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_BIO_LENGTH: usize = 500;

/// Minimum number of days between two username changes.
pub const USERNAME_CHANGE_INTERVAL_DAYS: i64 = 365;

/// Letters, digits and underscores; must start with a letter or underscore.
const USERNAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Username
// ---------------------------------------------------------------------------

/// Trim and lowercase a username for storage and comparison.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate a (normalized) username against the length and character rules.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits and underscores, and must not start with a digit"
                .into(),
        ));
    }
    Ok(())
}

/// Earliest instant at which a user who last changed their username at
/// `last_changed` may change it again.
pub fn next_username_change_at(last_changed: Timestamp) -> Timestamp {
    last_changed + Duration::days(USERNAME_CHANGE_INTERVAL_DAYS)
}

/// Enforce the once-per-year username change limit.
///
/// `last_changed` is `None` for accounts that have never changed their
/// username since registration; those may always change it.
pub fn check_username_change_allowed(
    last_changed: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    match last_changed {
        Some(at) if now < next_username_change_at(at) => {
            let next = next_username_change_at(at);
            Err(CoreError::RateLimited(format!(
                "Username can only be changed once per year. Next change allowed after {}",
                next.format("%Y-%m-%d")
            )))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Email / names / bio
// ---------------------------------------------------------------------------

/// Trim and lowercase an email address for storage and comparison.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email address".into()))
    }
}

/// Validate a first or last name. `field` is used in the error message.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(CoreError::Validation(format!(
            "Bio must be at most {MAX_BIO_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn accepts_well_formed_usernames() {
        for name in ["abc", "jane_doe", "_under", "user123", &"a".repeat(30)] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_bad_usernames() {
        for name in ["ab", "1abc", "has space", "dash-name", "émile", "", &"a".repeat(31)] {
            assert_matches!(validate_username(name), Err(CoreError::Validation(_)), "{name}");
        }
    }

    #[test]
    fn normalizes_username_and_email() {
        assert_eq!(normalize_username("  JaneDoe "), "janedoe");
        assert_eq!(normalize_email(" A@B.com "), "a@b.com");
    }

    #[test]
    fn first_username_change_is_always_allowed() {
        assert!(check_username_change_allowed(None, Utc::now()).is_ok());
    }

    #[test]
    fn second_change_within_a_year_is_rate_limited() {
        let changed = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let now = changed + Duration::days(364);
        assert_matches!(
            check_username_change_allowed(Some(changed), now),
            Err(CoreError::RateLimited(_))
        );
    }

    #[test]
    fn change_after_a_year_is_allowed() {
        let changed = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert!(check_username_change_allowed(Some(changed), changed + Duration::days(365)).is_ok());
    }

    #[test]
    fn validates_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn validates_names() {
        assert!(validate_name("First name", "Ada").is_ok());
        assert!(validate_name("First name", "   ").is_err());
        assert!(validate_name("Last name", &"x".repeat(51)).is_err());
    }

    #[test]
    fn validates_bio_length() {
        assert!(validate_bio(&"b".repeat(MAX_BIO_LENGTH)).is_ok());
        assert!(validate_bio(&"b".repeat(MAX_BIO_LENGTH + 1)).is_err());
    }
}
