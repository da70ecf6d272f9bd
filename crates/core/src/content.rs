//! Validation for user-authored content: projects, media items, comments.

use crate::error::CoreError;

pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;
pub const MAX_URL_LENGTH: usize = 2_048;
pub const MAX_CAPTION_LENGTH: usize = 300;
pub const MAX_COMMENT_LENGTH: usize = 2_000;

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Accept absolute `http`/`https` URLs only. `field` names the input in
/// the error message.
pub fn validate_http_url(field: &str, url: &str) -> Result<(), CoreError> {
    let url = url.trim();
    let has_scheme = url.starts_with("https://") || url.starts_with("http://");
    let host_part = url.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if !has_scheme || host_part.is_empty() || host_part.starts_with('/') {
        return Err(CoreError::Validation(format!(
            "{field} must be an absolute http(s) URL"
        )));
    }
    if url.len() > MAX_URL_LENGTH || url.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!("{field} is not a valid URL")));
    }
    Ok(())
}

pub fn validate_caption(caption: &str) -> Result<(), CoreError> {
    if caption.chars().count() > MAX_CAPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Caption must be at most {MAX_CAPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Comment must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}
