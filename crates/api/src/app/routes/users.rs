//! User CRUD (read/update/delete; creation happens through signup).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use geoportal_auth::{permissions, RequiredPermission};
use geoportal_core::UserId;
use geoportal_store::UserUpdate;

use crate::app::dto::UpdateUserRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let users = services
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;
    Ok(Json(users).into_response())
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let id: UserId = id.parse().map_err(|_| ApiError::validation("invalid user id"))?;
    let found = services
        .users
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;
    Ok(Json(found).into_response())
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::UPDATE)).await?;

    let id: UserId = id.parse().map_err(|_| ApiError::validation("invalid user id"))?;
    let updated = services
        .users
        .update(
            id,
            UserUpdate {
                username: body.username,
                email: body.email,
                role_id: body.role_id,
                department_id: body.department_id,
            },
        )
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;

    Ok(Json(serde_json::json!({
        "message": "User updated successfully",
        "user": updated,
    }))
    .into_response())
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::DELETE)).await?;

    let id: UserId = id.parse().map_err(|_| ApiError::validation("invalid user id"))?;
    services
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;

    Ok(Json(serde_json::json!({ "message": "User deleted successfully" })).into_response())
}
