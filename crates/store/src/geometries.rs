//! Geometry repository.
//!
//! Rows are written from typed [`Geometry`] values via the WKT encoder and
//! read back as GeoJSON (`ST_AsGeoJSON`), so the spatial column never sees
//! hand-built coordinate text. The spatial shape is immutable after insert;
//! updates touch name/description/metadata only.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{PgPool, Row};
use tracing::instrument;

use geoportal_core::{GeometryId, UserId};
use geoportal_geo::{wkt, Geometry, SRID};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct NewGeometry {
    pub name: String,
    pub description: Option<String>,
    pub geometry: Geometry,
    pub metadata: Value,
    pub created_by: UserId,
}

#[derive(Debug, Clone)]
pub struct GeometryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryRecord {
    pub id: GeometryId,
    pub name: String,
    pub description: Option<String>,
    pub geometry_type: String,
    /// GeoJSON geometry object, coordinates in [longitude, latitude] order.
    pub geometry: Value,
    pub metadata: Value,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    /// Username of the creator, when the read path joins it in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Per-type aggregate over all stored geometries.
///
/// Lengths and areas are computed on the geography projection, so units are
/// meters and square meters; both come out 0 for points.
#[derive(Debug, Clone, Serialize)]
pub struct GeometryStats {
    pub geometry_type: String,
    pub count: i64,
    pub avg_length: f64,
    pub avg_area: f64,
}

#[derive(Debug, Clone)]
pub struct GeometryStore {
    pool: PgPool,
}

impl GeometryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a validated geometry and return the stored row rendered back
    /// as GeoJSON. Callers run geofence validation first; nothing is written
    /// for rejected candidates.
    #[instrument(skip(self, geometry), fields(name = %geometry.name), err)]
    pub async fn insert(&self, geometry: NewGeometry) -> StoreResult<GeometryRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO geometries (name, description, geometry_type, geom, metadata, created_by)
            VALUES ($1, $2, $3, ST_GeomFromText($4, $5), $6, $7)
            RETURNING id, name, description, geometry_type,
                      ST_AsGeoJSON(geom) AS geometry, metadata, created_by, created_at
            "#,
        )
        .bind(&geometry.name)
        .bind(&geometry.description)
        .bind(geometry.geometry.geometry_type().as_str())
        .bind(wkt::to_wkt(&geometry.geometry))
        .bind(SRID)
        .bind(&geometry.metadata)
        .bind(geometry.created_by.as_i32())
        .fetch_one(&self.pool)
        .await?;

        map_geometry(&row, false)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> StoreResult<Vec<GeometryRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT g.id, g.name, g.description, g.geometry_type,
                   ST_AsGeoJSON(g.geom) AS geometry, g.metadata,
                   g.created_by, g.created_at, u.username AS creator
            FROM geometries g
            LEFT JOIN users u ON g.created_by = u.id
            ORDER BY g.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| map_geometry(row, true)).collect()
    }

    #[instrument(skip(self), fields(geometry_id = %id), err)]
    pub async fn get(&self, id: GeometryId) -> StoreResult<GeometryRecord> {
        let row = sqlx::query(
            r#"
            SELECT g.id, g.name, g.description, g.geometry_type,
                   ST_AsGeoJSON(g.geom) AS geometry, g.metadata,
                   g.created_by, g.created_at, u.username AS creator
            FROM geometries g
            LEFT JOIN users u ON g.created_by = u.id
            WHERE g.id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        map_geometry(&row, true)
    }

    /// Update the non-spatial fields only; the stored shape never changes.
    #[instrument(skip(self, update), fields(geometry_id = %id), err)]
    pub async fn update(&self, id: GeometryId, update: GeometryUpdate) -> StoreResult<GeometryRecord> {
        let row = sqlx::query(
            r#"
            UPDATE geometries
            SET name = $1, description = $2, metadata = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $4
            RETURNING id, name, description, geometry_type,
                      ST_AsGeoJSON(geom) AS geometry, metadata, created_by, created_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.metadata)
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        map_geometry(&row, false)
    }

    #[instrument(skip(self), fields(geometry_id = %id), err)]
    pub async fn delete(&self, id: GeometryId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM geometries WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Per-type count and average geodesic length/area.
    #[instrument(skip(self), err)]
    pub async fn stats(&self) -> StoreResult<Vec<GeometryStats>> {
        let rows = sqlx::query(
            r#"
            SELECT geometry_type,
                   COUNT(*) AS count,
                   AVG(ST_Length(geom::geography)) AS avg_length,
                   AVG(ST_Area(geom::geography)) AS avg_area
            FROM geometries
            GROUP BY geometry_type
            ORDER BY geometry_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(GeometryStats {
                    geometry_type: row.try_get("geometry_type")?,
                    count: row.try_get("count")?,
                    avg_length: row.try_get("avg_length")?,
                    avg_area: row.try_get("avg_area")?,
                })
            })
            .collect()
    }
}

fn map_geometry(row: &sqlx::postgres::PgRow, with_creator: bool) -> StoreResult<GeometryRecord> {
    let geometry_text: String = row.try_get("geometry")?;
    let geometry: Value = serde_json::from_str(&geometry_text)
        .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;

    Ok(GeometryRecord {
        id: GeometryId::from_i32(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        geometry_type: row.try_get("geometry_type")?,
        geometry,
        metadata: row.try_get("metadata")?,
        created_by: row.try_get::<Option<i32>, _>("created_by")?.map(UserId::from_i32),
        created_at: row.try_get("created_at")?,
        creator: if with_creator { row.try_get("creator")? } else { None },
    })
}
