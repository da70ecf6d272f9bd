pub mod admin;
pub mod auth;
pub mod comment;
pub mod media;
pub mod profile;
pub mod project;
pub mod report;
pub mod session;

use folio_core::access::{authorize, AccessGrant, OwnedResource};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Owner-or-admin check for a mutation on `resource`.
///
/// Call only after the resource was found. Admin overrides are written to the
/// `audit` log target.
pub(crate) fn authorize_mutation<R: OwnedResource>(
    resource: &R,
    user: &AuthUser,
    action: &'static str,
) -> AppResult<()> {
    if authorize(resource, &user.principal())? == AccessGrant::AdminOverride {
        tracing::info!(
            target: "audit",
            admin_id = user.user_id,
            entity = R::ENTITY,
            resource_id = resource.resource_id(),
            owner_id = resource.owner_id(),
            action,
            "Admin override"
        );
    }
    Ok(())
}
