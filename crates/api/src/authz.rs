//! Per-request permission guard.
//!
//! Authentication happened in the middleware; this resolves the caller's
//! permission set (one consistent read through their role) and evaluates the
//! handler's predicate before any store mutation runs.

use geoportal_auth::{authorize, RequiredPermission};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

/// Check that the authenticated caller satisfies the permission predicate.
///
/// The caller's role name is never consulted here, only the permissions
/// resolved through it.
pub async fn require(
    services: &AppServices,
    user: &CurrentUser,
    required: RequiredPermission,
) -> Result<(), ApiError> {
    let granted = services
        .permissions
        .resolve_for_user(user.user_id())
        .await
        .map_err(|e| ApiError::internal("Error checking permissions", e))?;

    authorize(&granted, &required)?;
    Ok(())
}
