//! User repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use tracing::instrument;

use geoportal_core::{DepartmentId, RoleId, UserId};

use crate::error::{StoreError, StoreResult};

/// Input for signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: Option<RoleId>,
    pub department_id: Option<DepartmentId>,
}

/// Row shape returned by create/update (no joined names).
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role_id: Option<RoleId>,
    pub department_id: Option<DepartmentId>,
}

/// List/read shape with role and department names joined in.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Signin lookup: credentials plus the role name for the token.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_name: Option<String>,
}

/// Fields an update may change.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub role_id: Option<RoleId>,
    pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user, enforcing username/email uniqueness.
    ///
    /// The existence check and the insert run in one transaction; two
    /// concurrent identical signups serialize there, and the unique
    /// constraints catch whatever still slips through.
    #[instrument(skip(self, user), fields(username = %user.username), err)]
    pub async fn create(&self, user: NewUser) -> StoreResult<UserRow> {
        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query(
            "SELECT 1 FROM users WHERE username = $1 OR email = $2",
        )
        .bind(&user.username)
        .bind(&user.email)
        .fetch_optional(&mut *tx)
        .await?;

        if taken.is_some() {
            return Err(StoreError::duplicate("username or email"));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password, role_id, department_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, role_id, department_id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id.map(|r| r.as_i32()))
        .bind(user.department_id.map(|d| d.as_i32()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::on_insert("username or email", e))?;

        let created = map_user_row(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Look up signin credentials by username, with the role name joined in.
    #[instrument(skip(self), err)]
    pub async fn find_credentials(&self, username: &str) -> StoreResult<Option<UserCredentials>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, u.password, r.name AS role_name
            FROM users u
            LEFT JOIN roles r ON u.role_id = r.id
            WHERE u.username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(UserCredentials {
                id: UserId::from_i32(row.try_get("id")?),
                username: row.try_get("username")?,
                email: row.try_get("email")?,
                password_hash: row.try_get("password")?,
                role_name: row.try_get("role_name")?,
            })
        })
        .transpose()
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> StoreResult<Vec<UserSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, r.name AS role, d.name AS department, u.created_at
            FROM users u
            LEFT JOIN roles r ON u.role_id = r.id
            LEFT JOIN departments d ON u.department_id = d.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user_summary).collect()
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    pub async fn get(&self, id: UserId) -> StoreResult<UserSummary> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, r.name AS role, d.name AS department, u.created_at
            FROM users u
            LEFT JOIN roles r ON u.role_id = r.id
            LEFT JOIN departments d ON u.department_id = d.id
            WHERE u.id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        map_user_summary(&row)
    }

    #[instrument(skip(self, update), fields(user_id = %id), err)]
    pub async fn update(&self, id: UserId, update: UserUpdate) -> StoreResult<UserRow> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET username = $1, email = $2, role_id = $3, department_id = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $5
            RETURNING id, username, email, role_id, department_id
            "#,
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(update.role_id.map(|r| r.as_i32()))
        .bind(update.department_id.map(|d| d.as_i32()))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::on_insert("username or email", e))?
        .ok_or(StoreError::NotFound)?;

        map_user_row(&row)
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    pub async fn delete(&self, id: UserId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn map_user_row(row: &sqlx::postgres::PgRow) -> StoreResult<UserRow> {
    Ok(UserRow {
        id: UserId::from_i32(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role_id: row.try_get::<Option<i32>, _>("role_id")?.map(RoleId::from_i32),
        department_id: row
            .try_get::<Option<i32>, _>("department_id")?
            .map(DepartmentId::from_i32),
    })
}

fn map_user_summary(row: &sqlx::postgres::PgRow) -> StoreResult<UserSummary> {
    Ok(UserSummary {
        id: UserId::from_i32(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role: row.try_get("role")?,
        department: row.try_get("department")?,
        created_at: row.try_get("created_at")?,
    })
}
