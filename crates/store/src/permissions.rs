//! Permission resolver.

use std::collections::HashSet;

use sqlx::{PgPool, Row};
use tracing::instrument;

use geoportal_core::UserId;

use crate::error::StoreResult;

#[derive(Debug, Clone)]
pub struct PermissionStore {
    pool: PgPool,
}

impl PermissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Permission names reachable through the user's current role, ordered by
    /// name. One joined SELECT, so the resolution is a single consistent read.
    /// A user with no role (or a role with no grants) gets an empty list, not
    /// an error.
    #[instrument(skip(self), fields(user_id = %user_id), err)]
    pub async fn permissions_for_user(&self, user_id: UserId) -> StoreResult<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT p.name
            FROM permissions p
            JOIN role_permissions rp ON p.id = rp.permission_id
            JOIN roles r ON r.id = rp.role_id
            JOIN users u ON u.role_id = r.id
            WHERE u.id = $1
            ORDER BY p.name
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|r| Ok(r.try_get("name")?)).collect()
    }

    /// The same resolution as [`Self::permissions_for_user`], as a set for
    /// policy evaluation.
    pub async fn resolve_for_user(&self, user_id: UserId) -> StoreResult<HashSet<String>> {
        Ok(self.permissions_for_user(user_id).await?.into_iter().collect())
    }
}
