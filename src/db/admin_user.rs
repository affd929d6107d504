//! Admin account repository.
//!
//! The dashboard has a single admin account. The repository still keys
//! operations by id so credential rotation can stay race-free.

use super::DbPool;
use crate::{FolioError, Result};

#[cfg(feature = "sqlite")]
const SQL_NOW: &str = "datetime('now')";
#[cfg(feature = "postgres")]
const SQL_NOW: &str = "TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')";

/// Admin account entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    /// Admin ID.
    pub id: i64,
    /// Login email (unique).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last credential update timestamp.
    pub updated_at: String,
}

/// Data for creating a new admin account.
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    /// Login email.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
}

impl NewAdminUser {
    /// Create a new admin with the given email and password hash.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Repository for admin account operations.
pub struct AdminUserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new admin account.
    pub async fn create(&self, new_admin: &NewAdminUser) -> Result<AdminUser> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO admins (email, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_admin.email)
        .bind(&new_admin.password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| FolioError::NotFound("admin".to_string()))
    }

    /// Get an admin by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password, created_at, updated_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get an admin by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password, created_at, updated_at
             FROM admins WHERE email = $1 COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get the primary admin account, if one exists.
    pub async fn first(&self) -> Result<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password, created_at, updated_at
             FROM admins ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Count admin accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Replace the email and password hash for an admin.
    ///
    /// Returns true if the admin existed and was updated.
    pub async fn update_credentials(
        &self,
        id: i64,
        email: &str,
        password_hash: &str,
    ) -> Result<bool> {
        let sql = format!(
            "UPDATE admins SET email = $1, password = $2, updated_at = {} WHERE id = $3",
            SQL_NOW
        );
        let result = sqlx::query(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
