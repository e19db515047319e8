//! Service wiring: stores, geofence validator, token codec.

use sqlx::PgPool;

use geoportal_auth::TokenCodec;
use geoportal_geo::GeofenceValidator;
use geoportal_store::{
    DepartmentStore, GeometryStore, PermissionStore, PgBoundaryProbe, RoleStore, UserStore,
};

/// Shared per-process services, handed to handlers as an `Extension<Arc<_>>`.
///
/// Everything here is a thin handle over the one connection pool; no other
/// cross-request mutable state exists.
pub struct AppServices {
    pub users: UserStore,
    pub roles: RoleStore,
    pub departments: DepartmentStore,
    pub geometries: GeometryStore,
    pub permissions: PermissionStore,
    pub geofence: GeofenceValidator<PgBoundaryProbe>,
    pub tokens: TokenCodec,
}

pub fn build_services(pool: PgPool, tokens: TokenCodec) -> AppServices {
    AppServices {
        users: UserStore::new(pool.clone()),
        roles: RoleStore::new(pool.clone()),
        departments: DepartmentStore::new(pool.clone()),
        geometries: GeometryStore::new(pool.clone()),
        permissions: PermissionStore::new(pool.clone()),
        geofence: GeofenceValidator::new(PgBoundaryProbe::new(pool)),
        tokens,
    }
}
