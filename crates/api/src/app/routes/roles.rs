//! Role CRUD; create/update accept an embedded permission-id list.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use geoportal_auth::{permissions, RequiredPermission};
use geoportal_core::RoleId;
use geoportal_store::RoleUpdate;

use crate::app::dto::RoleRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/:id", axum::routing::put(update_role).delete(delete_role))
}

pub async fn list_roles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let roles = services
        .roles
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Role"))?;
    Ok(Json(roles).into_response())
}

pub async fn create_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<RoleRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::CREATE)).await?;

    let role = services
        .roles
        .create(
            &body.name,
            body.description.as_deref(),
            body.permissions.as_deref().unwrap_or(&[]),
        )
        .await
        .map_err(|e| ApiError::from_store(e, "Role"))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Role created successfully",
            "role": role,
        })),
    )
        .into_response())
}

pub async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<RoleRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::UPDATE)).await?;

    let id: RoleId = id.parse().map_err(|_| ApiError::validation("invalid role id"))?;
    let role = services
        .roles
        .update(
            id,
            RoleUpdate {
                name: body.name,
                description: body.description,
                permissions: body.permissions,
            },
        )
        .await
        .map_err(|e| ApiError::from_store(e, "Role"))?;

    Ok(Json(serde_json::json!({
        "message": "Role updated successfully",
        "role": role,
    }))
    .into_response())
}

pub async fn delete_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::DELETE)).await?;

    let id: RoleId = id.parse().map_err(|_| ApiError::validation("invalid role id"))?;
    services
        .roles
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Role"))?;

    Ok(Json(serde_json::json!({ "message": "Role deleted successfully" })).into_response())
}
