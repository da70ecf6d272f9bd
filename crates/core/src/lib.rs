//! Domain rules for the Folio showcase backend.
//!
//! Nothing in this crate performs I/O. The persistence layer (`folio-db`) and
//! the HTTP layer (`folio-api`) both build on these types and predicates.

pub mod access;
pub mod content;
pub mod error;
pub mod profile;
pub mod rate_limit;
pub mod report;
pub mod roles;
pub mod search;
pub mod types;
