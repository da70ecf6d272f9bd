//! Authentication and authorization middleware and extractors.
//!
//! - [`identity::resolve_identity`] -- Cookie + token verification, the only place either happens.
//! - [`identity::attach_identity`] -- Resolves once per request into request extensions.
//! - [`auth::AuthUser`] / [`auth::OptionalAuth`] -- Caller identity extractors.
//! - [`guard::require_session`] / [`guard::require_admin`] -- Router-level gates.
//! - [`rbac::RequireAuth`] / [`rbac::RequireAdmin`] -- Handler-level gates.
//! - [`client::ClientAddr`] -- Client address for rate limiting.

pub mod auth;
pub mod client;
pub mod guard;
pub mod identity;
pub mod rbac;
