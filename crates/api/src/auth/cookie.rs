//! Session cookie manager.
//!
//! The session token travels in a single `HttpOnly` cookie. These helpers only
//! touch headers; they never verify the token.

use axum::http::header::{InvalidHeaderValue, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Session cookie lifetime: seven days.
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

const SESSION_COOKIE_PATH: &str = "/";

/// Attributes applied to every session cookie the server sets or clears.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Add the `Secure` attribute (default: on in production).
    pub secure: bool,
    pub max_age_secs: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false,
            max_age_secs: SESSION_COOKIE_MAX_AGE_SECS,
        }
    }
}

pub fn build_session_cookie(token: &str, config: &CookieConfig) -> String {
    let secure = if config.secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly; SameSite=Lax; Path={SESSION_COOKIE_PATH}; Max-Age={}{secure}",
        config.max_age_secs,
    )
}

pub fn build_clear_cookie(config: &CookieConfig) -> String {
    let secure = if config.secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path={SESSION_COOKIE_PATH}; Max-Age=0{secure}"
    )
}

/// Append a `Set-Cookie` header that stores `token` in the session cookie.
pub fn set_session_cookie(
    headers: &mut HeaderMap,
    token: &str,
    config: &CookieConfig,
) -> Result<(), InvalidHeaderValue> {
    let value = HeaderValue::from_str(&build_session_cookie(token, config))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

/// Append a `Set-Cookie` header that expires the session cookie.
///
/// Safe to call when the client never had a session.
pub fn clear_session_cookie(headers: &mut HeaderMap, config: &CookieConfig) {
    // Built only from constants, so always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&build_clear_cookie(config)) {
        headers.append(SET_COOKIE, value);
    }
}

/// Read the session token from the request's `Cookie` header(s).
///
/// An empty value counts as no session.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
