//! Geometry ingestion and CRUD.
//!
//! Create runs the full pipeline: parse the structured coordinates into a
//! typed geometry, validate against the active geofence boundaries, then
//! persist. A rejected candidate never reaches the store.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use geoportal_auth::{permissions, RequiredPermission};
use geoportal_core::GeometryId;
use geoportal_geo::{Geometry, GeometryType};
use geoportal_store::{GeometryUpdate, NewGeometry};

use crate::app::dto::{CreateGeometryRequest, UpdateGeometryRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_geometries).post(create_geometry))
        .route("/stats", get(geometry_stats))
        .route(
            "/:id",
            get(get_geometry).put(update_geometry).delete(delete_geometry),
        )
}

pub async fn create_geometry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateGeometryRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::CREATE)).await?;

    let geometry_type: GeometryType = body.geometry_type.parse()?;
    let geometry = Geometry::parse(geometry_type, &body.coordinates)?;

    services.geofence.validate(&geometry).await?;

    let record = services
        .geometries
        .insert(NewGeometry {
            name: body.name,
            description: body.description,
            geometry,
            metadata: body.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_by: user.user_id(),
        })
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Geometry created successfully",
            "geometry": record,
        })),
    )
        .into_response())
}

pub async fn list_geometries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let geometries = services
        .geometries
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;
    Ok(Json(geometries).into_response())
}

pub async fn geometry_stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let stats = services
        .geometries
        .stats()
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;
    Ok(Json(stats).into_response())
}

pub async fn get_geometry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::READ)).await?;

    let id: GeometryId = id
        .parse()
        .map_err(|_| ApiError::validation("invalid geometry id"))?;
    let geometry = services
        .geometries
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;
    Ok(Json(geometry).into_response())
}

pub async fn update_geometry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateGeometryRequest>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::UPDATE)).await?;

    let id: GeometryId = id
        .parse()
        .map_err(|_| ApiError::validation("invalid geometry id"))?;

    // Shape is immutable after creation; only the descriptive fields change,
    // so no geofence re-validation happens here.
    let record = services
        .geometries
        .update(
            id,
            GeometryUpdate {
                name: body.name,
                description: body.description,
                metadata: body.metadata.unwrap_or_else(|| serde_json::json!({})),
            },
        )
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;

    Ok(Json(serde_json::json!({
        "message": "Geometry updated successfully",
        "geometry": record,
    }))
    .into_response())
}

pub async fn delete_geometry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&services, &user, RequiredPermission::Has(permissions::DELETE)).await?;

    let id: GeometryId = id
        .parse()
        .map_err(|_| ApiError::validation("invalid geometry id"))?;
    services
        .geometries
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Geometry"))?;

    Ok(Json(serde_json::json!({ "message": "Geometry deleted successfully" })).into_response())
}
