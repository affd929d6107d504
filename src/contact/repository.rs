//! Contact info repository for folio.

use super::types::{ContactInfo, ContactInfoInput};
use crate::db::DbPool;
use crate::{FolioError, Result};

#[cfg(feature = "sqlite")]
const SQL_NOW: &str = "datetime('now')";
#[cfg(feature = "postgres")]
const SQL_NOW: &str = "TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')";

/// Repository for the contact info singleton.
pub struct ContactInfoRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ContactInfoRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Get the contact info record, if it has been set.
    pub async fn get(&self) -> Result<Option<ContactInfo>> {
        let result = sqlx::query_as::<_, ContactInfo>(
            "SELECT id, email, phone, linkedin, github, updated_at
             FROM contact_info WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Insert or replace the contact info record.
    ///
    /// The table holds at most one row; a second upsert overwrites the
    /// first rather than adding another record.
    pub async fn upsert(&self, input: &ContactInfoInput) -> Result<ContactInfo> {
        let sql = format!(
            "INSERT INTO contact_info (id, email, phone, linkedin, github, updated_at)
             VALUES (1, $1, $2, $3, $4, {SQL_NOW})
             ON CONFLICT(id) DO UPDATE SET
                 email = excluded.email,
                 phone = excluded.phone,
                 linkedin = excluded.linkedin,
                 github = excluded.github,
                 updated_at = excluded.updated_at
             RETURNING id, email, phone, linkedin, github, updated_at"
        );
        let info = sqlx::query_as::<_, ContactInfo>(&sql)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.linkedin)
            .bind(&input.github)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(info)
    }
}
