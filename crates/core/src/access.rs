//! Per-resource authorization predicates.
//!
//! Handlers must follow the order existence -> authorization -> mutation:
//! resolve the row with [`found`] (404 when absent), then call
//! [`authorize`] or [`assert_owner`] (403 when denied), and only then write.

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// A row that records the user who created it.
///
/// The owner reference is set at creation and never reassigned.
pub trait OwnedResource {
    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    fn resource_id(&self) -> DbId;

    fn owner_id(&self) -> DbId;
}

/// The caller an authorization decision is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: DbId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Why [`authorize`] granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant {
    /// The caller owns the resource.
    Owner,
    /// The caller does not own the resource but holds the admin role.
    AdminOverride,
}

/// Convert a lookup result into the resource or a 404-class error.
pub fn found<T>(row: Option<T>, entity: &'static str, id: DbId) -> Result<T, CoreError> {
    row.ok_or(CoreError::NotFound { entity, id })
}

/// Returns `true` when `principal` owns `resource`.
pub fn is_owner<R: OwnedResource>(resource: &R, principal: &Principal) -> bool {
    resource.owner_id() == principal.user_id
}

/// Strict ownership check with no admin override.
pub fn assert_owner<R: OwnedResource>(resource: &R, principal: &Principal) -> Result<(), CoreError> {
    if is_owner(resource, principal) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to modify this {}",
            R::ENTITY.to_lowercase()
        )))
    }
}

/// Owner-or-admin check.
pub fn can_access<R: OwnedResource>(resource: &R, principal: &Principal) -> bool {
    is_owner(resource, principal) || principal.role.is_admin()
}

/// Owner-or-admin check that reports which rule granted access so callers
/// can audit admin overrides.
pub fn authorize<R: OwnedResource>(
    resource: &R,
    principal: &Principal,
) -> Result<AccessGrant, CoreError> {
    if is_owner(resource, principal) {
        return Ok(AccessGrant::Owner);
    }
    if principal.role.is_admin() {
        return Ok(AccessGrant::AdminOverride);
    }
    assert_owner(resource, principal).map(|()| AccessGrant::Owner)
}
