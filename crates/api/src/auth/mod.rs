//! Authentication primitives.
//!
//! - [`password`] -- Argon2id credential hashing and verification.
//! - [`jwt`] -- Session token issuance and verification.
//! - [`cookie`] -- The `token` session cookie: attribute policy, set, clear, read.

pub mod cookie;
pub mod jwt;
pub mod password;
