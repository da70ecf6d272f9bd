use std::sync::Arc;

use folio_core::rate_limit::{FixedWindowLimiter, RateLimitStore};

use crate::auth::jwt::TokenService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Session token issuer/verifier built from `config.jwt`.
    pub tokens: Arc<TokenService>,
    /// Attempt counter for `POST /auth/register`, keyed by client address.
    pub registration_limiter: Arc<dyn RateLimitStore>,
}

impl AppState {
    /// Build the state with the in-process registration limiter.
    pub fn new(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let limiter = FixedWindowLimiter::new(
            chrono::Duration::seconds(config.registration_limit.window_secs),
            config.registration_limit.max_attempts,
        );
        Self::with_limiter(pool, config, Arc::new(limiter))
    }

    /// Build the state with a caller-supplied rate limit store.
    pub fn with_limiter(
        pool: folio_db::DbPool,
        config: ServerConfig,
        registration_limiter: Arc<dyn RateLimitStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        Self {
            pool,
            config: Arc::new(config),
            tokens,
            registration_limiter,
        }
    }
}
