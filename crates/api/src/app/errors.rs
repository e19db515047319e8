//! Error taxonomy and consistent JSON error responses.
//!
//! Every error response is `{"message": ...}` with an optional `"error"`
//! field carrying the underlying text for server-side failures.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use geoportal_auth::AccessDenied;
use geoportal_geo::{GeofenceError, GeometryError};
use geoportal_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or duplicate unique field (400).
    #[error("{0}")]
    Validation(String),

    /// No token supplied (403, reported as access-denied).
    #[error("no token provided")]
    MissingToken,

    /// Token failed verification or expired (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but lacking the required permission (403).
    #[error("{0}")]
    Forbidden(String),

    /// The id did not resolve (404); the payload names the resource.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Geometry outside every configured active boundary (400).
    #[error("geometry outside geofence")]
    Geofence,

    /// Unexpected store/runtime failure (500).
    #[error("{context}: {error}")]
    Internal { context: &'static str, error: String },
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(context: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Internal {
            context,
            error: error.to_string(),
        }
    }

    /// Map a store error, naming the resource for the 404 payload.
    pub fn from_store(err: StoreError, resource: &'static str) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(resource),
            StoreError::Duplicate(what) => {
                ApiError::Validation(format!("{what} already exists!"))
            }
            StoreError::Database(e) => ApiError::internal("Database error", e),
        }
    }
}

impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        let message = if err.missing.len() == 1 {
            format!("Access denied! You need '{}' permission.", err.missing[0])
        } else {
            format!(
                "Access denied! You need one of these permissions: {}",
                err.missing.join(", ")
            )
        };
        ApiError::Forbidden(message)
    }
}

impl From<GeometryError> for ApiError {
    fn from(err: GeometryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<GeofenceError<StoreError>> for ApiError {
    fn from(err: GeofenceError<StoreError>) -> Self {
        match err {
            GeofenceError::OutsideGeofence => ApiError::Geofence,
            GeofenceError::Probe(e) => ApiError::internal("Error checking geofence", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Validation(message) => json_message(StatusCode::BAD_REQUEST, message),
            ApiError::MissingToken => {
                json_message(StatusCode::FORBIDDEN, "No token provided!".to_string())
            }
            ApiError::Unauthorized => json_message(
                StatusCode::UNAUTHORIZED,
                "Unauthorized! Token is invalid or expired.".to_string(),
            ),
            ApiError::Forbidden(message) => json_message(StatusCode::FORBIDDEN, message),
            ApiError::NotFound(resource) => {
                json_message(StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            ApiError::Geofence => json_message(
                StatusCode::BAD_REQUEST,
                "Geometry is outside the allowed geofence boundaries".to_string(),
            ),
            ApiError::Internal { context, error } => {
                tracing::error!(context, %error, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "message": context, "error": error })),
                )
                    .into_response()
            }
        }
    }
}

fn json_message(status: StatusCode, message: String) -> axum::response::Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from_store(StoreError::NotFound, "Role");
        assert!(matches!(err, ApiError::NotFound("Role")));
    }

    #[test]
    fn store_duplicate_maps_to_validation() {
        let err = ApiError::from_store(StoreError::duplicate("username or email"), "User");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn single_missing_permission_message_names_it() {
        let err: ApiError = AccessDenied { missing: vec!["delete".into()] }.into();
        let ApiError::Forbidden(msg) = err else { panic!("expected Forbidden") };
        assert_eq!(msg, "Access denied! You need 'delete' permission.");
    }

    #[test]
    fn multiple_missing_permissions_are_listed() {
        let err: ApiError = AccessDenied {
            missing: vec!["create".into(), "update".into()],
        }
        .into();
        let ApiError::Forbidden(msg) = err else { panic!("expected Forbidden") };
        assert!(msg.contains("create, update"));
    }

    #[test]
    fn geofence_violation_maps_through() {
        let err: ApiError = GeofenceError::<StoreError>::OutsideGeofence.into();
        assert!(matches!(err, ApiError::Geofence));
    }
}
