//! PostGIS-backed boundary probe for the geofence validator.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use geoportal_geo::{wkt, BoundaryProbe, Geometry, SRID};

use crate::error::StoreError;

/// Delegates the containment predicate to `ST_Contains` over the
/// `geofence_boundaries` table. Boundaries are reference data maintained
/// outside this service and read here only.
#[derive(Debug, Clone)]
pub struct PgBoundaryProbe {
    pool: PgPool,
}

impl PgBoundaryProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoundaryProbe for PgBoundaryProbe {
    type Error = StoreError;

    async fn active_boundary_count(&self) -> Result<i64, Self::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM geofence_boundaries WHERE active = true")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    async fn contained_in_any_active(&self, candidate: &Geometry) -> Result<bool, Self::Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM geofence_boundaries
                WHERE active = true
                  AND ST_Contains(boundary, ST_GeomFromText($1, $2))
            ) AS contained
            "#,
        )
        .bind(wkt::to_wkt(candidate))
        .bind(SRID)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("contained")?)
    }
}
