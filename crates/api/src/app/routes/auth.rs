//! Public signup/signin endpoints.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;

use geoportal_auth::{hash_password, verify_password};
use geoportal_store::NewUser;

use crate::app::dto::{SigninRequest, SignupRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SignupRequest>,
) -> Result<Response, ApiError> {
    let password_hash =
        hash_password(&body.password).map_err(|e| ApiError::internal("Error during signup", e))?;

    let user = services
        .users
        .create(NewUser {
            username: body.username,
            email: body.email,
            password_hash,
            role_id: body.role_id,
            department_id: body.department_id,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully!",
            "user": user,
        })),
    )
        .into_response())
}

pub async fn signin(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SigninRequest>,
) -> Result<Response, ApiError> {
    let creds = services
        .users
        .find_credentials(&body.username)
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?
        .ok_or(ApiError::NotFound("User"))?;

    let valid = verify_password(&body.password, &creds.password_hash)
        .map_err(|e| ApiError::internal("Error during signin", e))?;
    if !valid {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "accessToken": null,
                "message": "Invalid password!",
            })),
        )
            .into_response());
    }

    let token = services
        .tokens
        .issue(creds.id, creds.role_name.clone(), Utc::now())
        .map_err(|e| ApiError::internal("Error during signin", e))?;

    let permissions = services
        .permissions
        .permissions_for_user(creds.id)
        .await
        .map_err(|e| ApiError::from_store(e, "User"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "id": creds.id,
            "username": creds.username,
            "email": creds.email,
            "role": creds.role_name,
            "permissions": permissions,
            "accessToken": token,
        })),
    )
        .into_response())
}
