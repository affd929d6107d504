//! Storage for refresh tokens.
//!
//! Access tokens are stateless JWTs, so sessions are anchored here instead:
//! a refresh token row exists until it expires, is rotated away, or is
//! revoked. Revocation keeps the row (with `revoked_at` set) so a replayed
//! token is distinguishable from one that never existed; a background sweep
//! deletes dead rows later.

use super::DbPool;
use crate::{FolioError, Result};

#[cfg(feature = "sqlite")]
const SQL_NOW: &str = "datetime('now')";
#[cfg(feature = "postgres")]
const SQL_NOW: &str = "TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')";

/// One stored refresh token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    /// Row ID.
    pub id: i64,
    /// Owning admin.
    pub admin_id: i64,
    /// The opaque token string handed to the client.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: String,
    /// When the row was written.
    pub created_at: String,
    /// Set once the token is revoked or rotated away.
    pub revoked_at: Option<String>,
}

/// Fields needed to persist a freshly issued token.
pub struct NewRefreshToken {
    /// Owning admin.
    pub admin_id: i64,
    /// The opaque token string.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: String,
}

impl NewRefreshToken {
    /// Bundle up the fields for [`RefreshTokenRepository::create`].
    pub fn new(admin_id: i64, token: impl Into<String>, expires_at: impl Into<String>) -> Self {
        Self {
            admin_id,
            token: token.into(),
            expires_at: expires_at.into(),
        }
    }
}

/// Queries over the `refresh_tokens` table.
pub struct RefreshTokenRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RefreshTokenRepository<'a> {
    /// Borrow the pool for a batch of token operations.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Persist a newly issued token and return the stored row.
    pub async fn create(&self, new_token: &NewRefreshToken) -> Result<RefreshToken> {
        let token = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (admin_id, token, expires_at) VALUES ($1, $2, $3)
             RETURNING id, admin_id, token, expires_at, created_at, revoked_at",
        )
        .bind(new_token.admin_id)
        .bind(&new_token.token)
        .bind(&new_token.expires_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(token)
    }

    /// Look up a token that is neither expired nor revoked.
    ///
    /// This is the only lookup the refresh endpoint uses, so a revoked or
    /// expired token behaves exactly like an unknown one.
    pub async fn get_valid_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let sql = format!(
            "SELECT id, admin_id, token, expires_at, created_at, revoked_at
             FROM refresh_tokens
             WHERE token = $1 AND revoked_at IS NULL AND expires_at > {}",
            SQL_NOW
        );
        let result = sqlx::query_as::<_, RefreshToken>(&sql)
            .bind(token)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Mark one token revoked. Returns false if it was already dead.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        let sql = format!(
            "UPDATE refresh_tokens SET revoked_at = {} WHERE token = $1 AND revoked_at IS NULL",
            SQL_NOW
        );
        let result = sqlx::query(&sql)
            .bind(token)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live token an admin holds, returning how many fell.
    ///
    /// Credential rotation calls this so stolen sessions die with the old
    /// password.
    pub async fn revoke_all_for_admin(&self, admin_id: i64) -> Result<u64> {
        let sql = format!(
            "UPDATE refresh_tokens SET revoked_at = {} WHERE admin_id = $1 AND revoked_at IS NULL",
            SQL_NOW
        );
        let result = sqlx::query(&sql)
            .bind(admin_id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete rows that can never be accepted again.
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let sql = format!(
            "DELETE FROM refresh_tokens WHERE expires_at < {} OR revoked_at IS NOT NULL",
            SQL_NOW
        );
        let result = sqlx::query(&sql)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Look up a token row regardless of its state.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, RefreshToken>(
            "SELECT id, admin_id, token, expires_at, created_at, revoked_at
             FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AdminUserRepository, NewAdminUser};
    use crate::Database;

    const FUTURE: &str = "2099-06-30 12:00:00";
    const PAST: &str = "2001-01-01 00:00:00";

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        AdminUserRepository::new(db.pool())
            .create(&NewAdminUser::new("admin@example.com", "hashedpw"))
            .await
            .unwrap();
        db
    }

    async fn insert(repo: &RefreshTokenRepository<'_>, token: &str, expires_at: &str) {
        repo.create(&NewRefreshToken::new(1, token, expires_at))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_created_row_starts_unrevoked() {
        let db = setup_db().await;
        let repo = RefreshTokenRepository::new(db.pool());

        let row = repo
            .create(&NewRefreshToken::new(1, "fresh-session", FUTURE))
            .await
            .unwrap();

        assert_eq!(row.admin_id, 1);
        assert_eq!(row.token, "fresh-session");
        assert!(row.revoked_at.is_none());
        assert!(!row.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_valid_lookup_skips_expired_and_unknown() {
        let db = setup_db().await;
        let repo = RefreshTokenRepository::new(db.pool());

        insert(&repo, "live-session", FUTURE).await;
        insert(&repo, "stale-session", PAST).await;

        assert!(repo.get_valid_token("live-session").await.unwrap().is_some());
        assert!(repo.get_valid_token("stale-session").await.unwrap().is_none());
        assert!(repo.get_valid_token("no-such-session").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoked_token_stops_validating_but_keeps_its_row() {
        let db = setup_db().await;
        let repo = RefreshTokenRepository::new(db.pool());

        insert(&repo, "doomed-session", FUTURE).await;

        assert!(repo.revoke("doomed-session").await.unwrap());
        assert!(repo.get_valid_token("doomed-session").await.unwrap().is_none());

        // The row survives with revoked_at stamped
        let row = repo.get_by_token("doomed-session").await.unwrap().unwrap();
        assert!(row.revoked_at.is_some());

        // A second revoke finds nothing left to do
        assert!(!repo.revoke("doomed-session").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_all_counts_only_live_tokens() {
        let db = setup_db().await;
        let repo = RefreshTokenRepository::new(db.pool());

        insert(&repo, "laptop", FUTURE).await;
        insert(&repo, "phone", FUTURE).await;
        insert(&repo, "tablet", FUTURE).await;
        repo.revoke("tablet").await.unwrap();

        assert_eq!(repo.revoke_all_for_admin(1).await.unwrap(), 2);
        assert!(repo.get_valid_token("laptop").await.unwrap().is_none());
        assert!(repo.get_valid_token("phone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_deletes_dead_rows_only() {
        let db = setup_db().await;
        let repo = RefreshTokenRepository::new(db.pool());

        insert(&repo, "live-session", FUTURE).await;
        insert(&repo, "stale-session", PAST).await;
        insert(&repo, "doomed-session", FUTURE).await;
        repo.revoke("doomed-session").await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 2);

        assert!(repo.get_by_token("live-session").await.unwrap().is_some());
        assert!(repo.get_by_token("stale-session").await.unwrap().is_none());
        assert!(repo.get_by_token("doomed-session").await.unwrap().is_none());
    }
}
