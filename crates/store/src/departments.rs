//! Department repository.

use serde::Serialize;
use sqlx::{PgPool, Row};
use tracing::instrument;

use geoportal_core::DepartmentId;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentRecord {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DepartmentStore {
    pool: PgPool,
}

impl DepartmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> StoreResult<Vec<DepartmentRecord>> {
        let rows = sqlx::query("SELECT id, name, description FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_department).collect()
    }

    #[instrument(skip(self, description), fields(department = %name), err)]
    pub async fn create(&self, name: &str, description: Option<&str>) -> StoreResult<DepartmentRecord> {
        let row = sqlx::query(
            "INSERT INTO departments (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_insert("department name", e))?;

        map_department(&row)
    }

    #[instrument(skip(self, description), fields(department_id = %id), err)]
    pub async fn update(
        &self,
        id: DepartmentId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<DepartmentRecord> {
        let row = sqlx::query(
            "UPDATE departments SET name = $1, description = $2 WHERE id = $3 RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        map_department(&row)
    }

    #[instrument(skip(self), fields(department_id = %id), err)]
    pub async fn delete(&self, id: DepartmentId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn map_department(row: &sqlx::postgres::PgRow) -> StoreResult<DepartmentRecord> {
    Ok(DepartmentRecord {
        id: DepartmentId::from_i32(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}
