//! Content report status constants and transition rules.
//!
//! Reports target exactly one project or one comment. Admins move them
//! through the statuses below; `RESOLVED` and `DISMISSED` are terminal.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly filed report.
pub const STATUS_PENDING: &str = "PENDING";
/// An admin has looked at the report but not closed it.
pub const STATUS_REVIEWED: &str = "REVIEWED";
/// Action was taken on the reported content.
pub const STATUS_RESOLVED: &str = "RESOLVED";
/// The report was closed without action.
pub const STATUS_DISMISSED: &str = "DISMISSED";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_REVIEWED,
    STATUS_RESOLVED,
    STATUS_DISMISSED,
];

/// Statuses that still count against the duplicate-report rule.
pub const OPEN_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_REVIEWED];

pub const MAX_REASON_LENGTH: usize = 500;
pub const MAX_DETAILS_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses `from_status` may transition to.
///
/// - `PENDING`  -> `REVIEWED`, `RESOLVED`, `DISMISSED`
/// - `REVIEWED` -> `RESOLVED`, `DISMISSED`
/// - `RESOLVED`, `DISMISSED` -> (none)
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_REVIEWED, STATUS_RESOLVED, STATUS_DISMISSED],
        STATUS_REVIEWED => &[STATUS_RESOLVED, STATUS_DISMISSED],
        _ => &[],
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    validate_status(next)?;
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition report from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

pub fn is_open(status: &str) -> bool {
    OPEN_STATUSES.contains(&status)
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Exactly one of the two targets must be set.
pub fn validate_target(project_id: Option<i64>, comment_id: Option<i64>) -> Result<(), CoreError> {
    match (project_id, comment_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(CoreError::Validation(
            "A report must target exactly one of projectId or commentId".into(),
        )),
    }
}

pub fn validate_reason(reason: &str) -> Result<(), CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Reason is required".into()));
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reason must be at most {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_details(details: &str) -> Result<(), CoreError> {
    if details.chars().count() > MAX_DETAILS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Details must be at most {MAX_DETAILS_LENGTH} characters"
        )));
    }
    Ok(())
}
