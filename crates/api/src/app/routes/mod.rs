use axum::Router;

pub mod auth;
pub mod departments;
pub mod geometries;
pub mod roles;
pub mod system;
pub mod users;

/// Router for all permission-guarded endpoints (mounted behind the auth
/// middleware).
pub fn protected_router() -> Router {
    Router::new()
        .nest("/users", users::router())
        .nest("/roles", roles::router())
        .nest("/departments", departments::router())
        .nest("/geometries", geometries::router())
}
