//! Role repository.
//!
//! Roles are shared reference data: many users point at one role, and a
//! role's permission links are replaced wholesale (delete-then-insert inside
//! one transaction), never diffed.

use serde::Serialize;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use geoportal_core::{PermissionId, RoleId};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
    /// Permission names granted through this role (empty when none).
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RoleUpdate {
    pub name: String,
    pub description: Option<String>,
    /// When present, the role's whole permission set is replaced with this
    /// list; when absent, existing links are left untouched.
    pub permissions: Option<Vec<PermissionId>>,
}

#[derive(Debug, Clone)]
pub struct RoleStore {
    pool: PgPool,
}

impl RoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> StoreResult<Vec<RoleRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name, r.description,
                   COALESCE(
                       array_agg(p.name ORDER BY p.name) FILTER (WHERE p.name IS NOT NULL),
                       '{}'
                   ) AS permissions
            FROM roles r
            LEFT JOIN role_permissions rp ON r.id = rp.role_id
            LEFT JOIN permissions p ON rp.permission_id = p.id
            GROUP BY r.id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(RoleRecord {
                    id: RoleId::from_i32(row.try_get("id")?),
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    permissions: row.try_get("permissions")?,
                })
            })
            .collect()
    }

    /// Create a role and link the given permissions, atomically.
    #[instrument(skip(self, description, permissions), fields(role = %name), err)]
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        permissions: &[PermissionId],
    ) -> StoreResult<RoleRecord> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::on_insert("role name", e))?;

        let id = RoleId::from_i32(row.try_get("id")?);
        insert_permission_links(&mut tx, id, permissions).await?;

        let record = RoleRecord {
            id,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            permissions: permission_names(&mut tx, id).await?,
        };

        tx.commit().await?;
        Ok(record)
    }

    /// Update a role; when a permission list is supplied the whole link set
    /// is replaced inside the same transaction.
    #[instrument(skip(self, update), fields(role_id = %id), err)]
    pub async fn update(&self, id: RoleId, update: RoleUpdate) -> StoreResult<RoleRecord> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "UPDATE roles SET name = $1, description = $2 WHERE id = $3 RETURNING id, name, description",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        if let Some(permissions) = &update.permissions {
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
                .bind(id.as_i32())
                .execute(&mut *tx)
                .await?;
            insert_permission_links(&mut tx, id, permissions).await?;
        }

        let record = RoleRecord {
            id,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            permissions: permission_names(&mut tx, id).await?,
        };

        tx.commit().await?;
        Ok(record)
    }

    /// Delete a role and its permission links atomically, so no link rows
    /// outlive the role.
    #[instrument(skip(self), fields(role_id = %id), err)]
    pub async fn delete(&self, id: RoleId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_permission_links(
    tx: &mut Transaction<'_, Postgres>,
    role_id: RoleId,
    permissions: &[PermissionId],
) -> StoreResult<()> {
    for permission_id in permissions {
        sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
            .bind(role_id.as_i32())
            .bind(permission_id.as_i32())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn permission_names(
    tx: &mut Transaction<'_, Postgres>,
    role_id: RoleId,
) -> StoreResult<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT p.name
        FROM permissions p
        JOIN role_permissions rp ON p.id = rp.permission_id
        WHERE rp.role_id = $1
        ORDER BY p.name
        "#,
    )
    .bind(role_id.as_i32())
    .fetch_all(&mut **tx)
    .await?;

    rows.iter().map(|r| Ok(r.try_get("name")?)).collect()
}
