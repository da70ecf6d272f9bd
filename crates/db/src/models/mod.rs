//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs consumed by the repositories

pub mod comment;
pub mod media;
pub mod project;
pub mod report;
pub mod stats;
pub mod user;
