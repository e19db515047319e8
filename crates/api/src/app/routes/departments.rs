//! Department CRUD.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use geoportal_auth::{permissions, RequiredPermission};
use geoportal_core::DepartmentId;

use crate::app::dto::DepartmentRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            axum::routing::put(update_department).delete(delete_department),
        )
}

pub async fn list_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let departments = services
        .departments
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Department"))?;
    Ok(Json(departments).into_response())
}

pub async fn create_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<DepartmentRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::CREATE)).await?;

    let department = services
        .departments
        .create(&body.name, body.description.as_deref())
        .await
        .map_err(|e| ApiError::from_store(e, "Department"))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Department created successfully",
            "department": department,
        })),
    )
        .into_response())
}

pub async fn update_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<DepartmentRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::UPDATE)).await?;

    let id: DepartmentId = id
        .parse()
        .map_err(|_| ApiError::validation("invalid department id"))?;
    let department = services
        .departments
        .update(id, &body.name, body.description.as_deref())
        .await
        .map_err(|e| ApiError::from_store(e, "Department"))?;

    Ok(Json(serde_json::json!({
        "message": "Department updated successfully",
        "department": department,
    }))
    .into_response())
}

pub async fn delete_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::DELETE)).await?;

    let id: DepartmentId = id
        .parse()
        .map_err(|_| ApiError::validation("invalid department id"))?;
    services
        .departments
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Department"))?;

    Ok(Json(serde_json::json!({ "message": "Department deleted successfully" })).into_response())
}
