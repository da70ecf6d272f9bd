//! Server configuration, read from environment variables at startup.
//!
//! | Env Var                           | Default                    |
//! |-----------------------------------|----------------------------|
//! | `HOST`                            | `0.0.0.0`                  |
//! | `PORT`                            | `3000`                     |
//! | `APP_ENV`                         | `development`              |
//! | `CORS_ORIGINS`                    | `http://localhost:5173`    |
//! | `REQUEST_TIMEOUT_SECS`            | `30`                       |
//! | `TRUST_PROXY_HEADERS`             | `false`                    |
//! | `JWT_SECRET`                      | required in production     |
//! | `JWT_EXPIRY_DAYS`                 | `7`                        |
//! | `COOKIE_SECURE`                   | `true` in production       |
//! | `REGISTER_RATE_LIMIT_MAX`         | `5`                        |
//! | `REGISTER_RATE_LIMIT_WINDOW_SECS` | `300`                      |
//!
//! `APP_ENV=production` (or `prod`) requires `JWT_SECRET` and rejects the
//! development fallback secret. `DATABASE_URL` is read by the binary itself.

use std::str::FromStr;

use folio_core::rate_limit::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW_SECS};

use crate::auth::cookie::{CookieConfig, SESSION_COOKIE_MAX_AGE_SECS};
use crate::auth::jwt::{JwtConfig, DEFAULT_TOKEN_EXPIRY_DAYS};

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `production` and `prod` (any case) select production; anything else,
    /// including an unset variable, is development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "production" || v == "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Startup configuration errors. The server refuses to start on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET must not be the development fallback secret in production")]
    InsecureJwtSecret,

    #[error("{var} must be a {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Registration rate limit settings.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Attempts allowed per window per client address (default: `5`).
    pub max_attempts: u32,
    /// Window length in seconds (default: `300`).
    pub window_secs: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Key the registration limiter on `X-Forwarded-For` / `X-Real-IP`
    /// instead of the socket peer. Enable only behind a proxy that
    /// overwrites those headers (default: `false`).
    pub trust_proxy_headers: bool,
    /// Session token signing configuration.
    pub jwt: JwtConfig,
    /// Session cookie attributes.
    pub cookie: CookieConfig,
    pub registration_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("APP_ENV").as_deref());

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_var(&lookup, "PORT", 3000, "valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30, "valid u64")?;
        let trust_proxy_headers = parse_var(&lookup, "TRUST_PROXY_HEADERS", false, "boolean")?;

        let expiry_days: i64 = parse_var(
            &lookup,
            "JWT_EXPIRY_DAYS",
            DEFAULT_TOKEN_EXPIRY_DAYS,
            "valid number of days",
        )?;
        let jwt = JwtConfig::resolve(lookup("JWT_SECRET"), expiry_days, environment)?;

        let secure = parse_var(
            &lookup,
            "COOKIE_SECURE",
            environment.is_production(),
            "boolean",
        )?;
        let cookie = CookieConfig {
            secure,
            max_age_secs: SESSION_COOKIE_MAX_AGE_SECS,
        };

        let max_attempts: u32 = parse_var(
            &lookup,
            "REGISTER_RATE_LIMIT_MAX",
            DEFAULT_MAX_ATTEMPTS,
            "valid u32",
        )?;
        let window_secs: i64 = parse_var(
            &lookup,
            "REGISTER_RATE_LIMIT_WINDOW_SECS",
            DEFAULT_WINDOW_SECS,
            "valid number of seconds",
        )?;
        if window_secs <= 0 {
            return Err(ConfigError::Invalid {
                var: "REGISTER_RATE_LIMIT_WINDOW_SECS",
                expected: "positive number of seconds",
                value: window_secs.to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            trust_proxy_headers,
            jwt,
            cookie,
            registration_limit: RateLimitConfig {
                max_attempts,
                window_secs,
            },
        })
    }
}

fn parse_var<T, F>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::jwt::DEV_FALLBACK_SECRET;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_for_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.jwt.secret, DEV_FALLBACK_SECRET);
        assert_eq!(config.jwt.expiry_days, 7);
        assert!(!config.cookie.secure);
        assert!(!config.trust_proxy_headers);
        assert_eq!(config.cookie.max_age_secs, 604_800);
        assert_eq!(config.registration_limit.max_attempts, 5);
        assert_eq!(config.registration_limit.window_secs, 300);
    }

    #[test]
    fn production_without_secret_fails() {
        assert_matches!(
            load(&[("APP_ENV", "production")]),
            Err(ConfigError::MissingJwtSecret)
        );
        assert_matches!(
            load(&[("APP_ENV", "PROD"), ("JWT_SECRET", "")]),
            Err(ConfigError::MissingJwtSecret)
        );
    }

    #[test]
    fn production_defaults_to_secure_cookies() {
        let config = load(&[("APP_ENV", "production"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert!(config.environment.is_production());
        assert!(config.cookie.secure);

        let config = load(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
            ("COOKIE_SECURE", "false"),
        ])
        .unwrap();
        assert!(!config.cookie.secure);
    }

    #[test]
    fn invalid_numbers_are_reported() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("REGISTER_RATE_LIMIT_MAX", "-1")]),
            Err(ConfigError::Invalid { var: "REGISTER_RATE_LIMIT_MAX", .. })
        );
    }

    #[test]
    fn proxy_headers_are_trusted_only_when_enabled() {
        assert!(load(&[("TRUST_PROXY_HEADERS", "true")]).unwrap().trust_proxy_headers);
        assert_matches!(
            load(&[("TRUST_PROXY_HEADERS", "yes")]),
            Err(ConfigError::Invalid { var: "TRUST_PROXY_HEADERS", .. })
        );
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let config = load(&[("CORS_ORIGINS", "https://a.dev, https://b.dev,,")]).unwrap();
        assert_eq!(config.cors_origins, vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(Environment::parse(None), Environment::Development);
        assert_eq!(Environment::parse(Some("staging")), Environment::Development);
        assert_eq!(Environment::parse(Some("Production")), Environment::Production);
    }
}
