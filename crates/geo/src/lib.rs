//! `geoportal-geo` — typed geometry model and geofence policy.
//!
//! Coordinates come in as structured JSON, become a [`Geometry`] value here,
//! and only leave as canonical WKT (toward the store) or GeoJSON (toward the
//! client). No handler ever interpolates raw coordinate text.

pub mod geofence;
pub mod geojson;
pub mod geometry;
pub mod wkt;

pub use geofence::{BoundaryProbe, GeofenceError, GeofenceValidator};
pub use geometry::{Geometry, GeometryError, GeometryType, Position};

/// Spatial reference for all stored geometries (longitude/latitude, WGS 84).
pub const SRID: i32 = 4326;
