//! `geoportal-store` — Postgres/PostGIS adapters.
//!
//! Each store wraps the shared connection pool; multi-statement sequences
//! (signup's check-then-insert, role permission replacement) run inside a
//! single transaction so concurrent writers cannot interleave between the
//! statements.

pub mod departments;
pub mod error;
pub mod geofence;
pub mod geometries;
pub mod permissions;
pub mod pool;
pub mod roles;
pub mod users;

pub use departments::{DepartmentRecord, DepartmentStore};
pub use error::{StoreError, StoreResult};
pub use geofence::PgBoundaryProbe;
pub use geometries::{GeometryRecord, GeometryStats, GeometryStore, GeometryUpdate, NewGeometry};
pub use permissions::PermissionStore;
pub use pool::connect;
pub use roles::{RoleRecord, RoleStore, RoleUpdate};
pub use users::{NewUser, UserCredentials, UserRow, UserStore, UserSummary, UserUpdate};
