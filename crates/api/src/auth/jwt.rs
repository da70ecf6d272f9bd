//! Session token issuance and verification.
//!
//! Session tokens are HS256-signed JWTs carrying a [`Claims`] payload. They
//! are never stored server-side: a token is valid until its `exp` passes or
//! the client drops the cookie that carries it.

use chrono::{Duration, Utc};
use folio_core::roles::Role;
use folio_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, Environment};

/// Secret used when `JWT_SECRET` is unset outside production.
pub const DEV_FALLBACK_SECRET: &str = "folio-dev-secret-do-not-use-in-production";

/// Default session lifetime in days.
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;

/// The identity facts embedded in a session token.
///
/// Frozen at issuance: profile edits made afterwards are only visible once a
/// new token is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// JWT claims: the identity plus registered timestamp and id claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: DbId,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

impl Claims {
    /// The identity portion of the claims, without timestamps.
    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            sub: self.sub,
            email: self.email.clone(),
            role: self.role,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Configuration for session token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 7).
    pub expiry_days: i64,
}

impl JwtConfig {
    /// Resolve the signing secret for the given environment.
    ///
    /// Production requires a non-empty secret that is not the development
    /// fallback. Elsewhere a missing secret falls back to
    /// [`DEV_FALLBACK_SECRET`] with a warning.
    pub fn resolve(
        secret: Option<String>,
        expiry_days: i64,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let secret = secret.filter(|s| !s.trim().is_empty());

        let secret = match (secret, environment) {
            (Some(s), Environment::Production) if s == DEV_FALLBACK_SECRET => {
                return Err(ConfigError::InsecureJwtSecret);
            }
            (Some(s), _) => s,
            (None, Environment::Production) => return Err(ConfigError::MissingJwtSecret),
            (None, Environment::Development) => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the built-in development secret. \
                     Sessions are forgeable by anyone who knows it"
                );
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        if expiry_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_DAYS",
                expected: "positive number of days",
                value: expiry_days.to_string(),
            });
        }

        Ok(Self {
            secret,
            expiry_days,
        })
    }
}

/// Issues and verifies session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: Duration::days(config.expiry_days),
        }
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity` with the configured lifetime.
    pub fn issue(&self, identity: &IdentityClaims) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(identity, self.ttl)
    }

    /// Issue a token that expires `ttl` from now.
    pub fn issue_with_ttl(
        &self,
        identity: &IdentityClaims,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: identity.sub,
            email: identity.email.clone(),
            role: identity.role,
            username: identity.username.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            iat: now,
            exp: now + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify signature and expiry, returning the claims on success.
    ///
    /// Every failure (bad signature, malformed token, expired) yields `None`;
    /// the reason is only logged.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                tracing::debug!(error = %err, "Session token rejected");
                return None;
            }
        };

        // `exp` is exclusive: a token is dead from its expiry second onwards.
        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!(sub = claims.sub, "Session token expired");
            return None;
        }

        Some(claims)
    }
}
