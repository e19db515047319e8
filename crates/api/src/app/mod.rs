//! Application assembly: routers, middleware layering, CORS.

use std::sync::Arc;

use axum::{extract::Extension, http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full application router.
///
/// `/api/auth/*` and `/api/health` are public; everything else under `/api`
/// sits behind the token middleware, so handlers there can rely on a
/// [`crate::context::CurrentUser`] extension.
pub fn build_app(services: Arc<AppServices>, cors_origins: &[String]) -> Router {
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        services.clone(),
        crate::middleware::auth_middleware,
    ));

    let api = Router::new()
        .nest("/auth", routes::auth::router())
        .route("/health", get(routes::system::health))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .layer(Extension(services))
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderName::from_static("x-access-token"),
        ])
}
