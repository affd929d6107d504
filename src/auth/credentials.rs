//! Admin credential rotation.
//!
//! Changing the dashboard sign-in works in a fixed order: verify the
//! current password, validate the new values, mail them to the backup
//! address, then persist and revoke every open session. The mail goes
//! out first so a failed delivery leaves the old credentials in effect
//! and the owner is never holding credentials that were not backed up.

use tracing::info;
use validator::ValidateEmail;

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::db::{AdminUserRepository, RefreshTokenRepository};
use crate::mailer::CredentialNotifier;
use crate::{Database, FolioError, Result};

/// Replace the admin's email and password.
///
/// Returns the revoked session count on success. All refresh tokens for
/// the account are revoked, so every device has to sign in again with
/// the new credentials.
pub async fn rotate_credentials(
    db: &Database,
    notifier: &CredentialNotifier,
    admin_id: i64,
    current_password: &str,
    new_email: &str,
    new_password: &str,
) -> Result<u64> {
    let admins = AdminUserRepository::new(db.pool());

    let admin = admins
        .get_by_id(admin_id)
        .await?
        .ok_or_else(|| FolioError::NotFound("admin".to_string()))?;

    verify_password(current_password, &admin.password).map_err(|e| match e {
        PasswordError::VerificationFailed => {
            FolioError::Auth("current password is incorrect".to_string())
        }
        other => FolioError::Auth(other.to_string()),
    })?;

    if !new_email.validate_email() {
        return Err(FolioError::Validation(
            "a valid email address is required".to_string(),
        ));
    }

    let new_hash = hash_password(new_password).map_err(|e| match e {
        PasswordError::TooShort | PasswordError::TooLong => {
            FolioError::Validation(e.to_string())
        }
        other => FolioError::Database(other.to_string()),
    })?;

    // The backup mail must land before anything changes.
    notifier
        .send_credential_update(new_email, new_password)
        .await?;

    let updated = admins
        .update_credentials(admin_id, new_email, &new_hash)
        .await?;
    if !updated {
        return Err(FolioError::NotFound("admin".to_string()));
    }

    let tokens = RefreshTokenRepository::new(db.pool());
    let revoked = tokens.revoke_all_for_admin(admin_id).await?;

    info!(
        admin_id = admin_id,
        email = %new_email,
        revoked_sessions = revoked,
        "Admin credentials rotated"
    );

    Ok(revoked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::SmtpConfig;
    use crate::db::{NewAdminUser, NewRefreshToken};
    use crate::mailer::MemoryMailer;

    fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "app-password".to_string(),
            from_address: "mailer@example.com".to_string(),
            backup_address: "backup@example.com".to_string(),
            timeout_secs: 10,
        }
    }

    async fn setup() -> (Database, MemoryMailer, CredentialNotifier, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let mailer = MemoryMailer::new();
        let notifier = CredentialNotifier::with_transport(Arc::new(mailer.clone()), &smtp_config());

        let repo = AdminUserRepository::new(db.pool());
        let hash = hash_password("oldPassword1").unwrap();
        let admin = repo
            .create(&NewAdminUser::new("admin@example.com", hash))
            .await
            .unwrap();

        (db, mailer, notifier, admin.id)
    }

    #[tokio::test]
    async fn test_rotation_updates_and_notifies() {
        let (db, mailer, notifier, admin_id) = setup().await;

        rotate_credentials(
            &db,
            &notifier,
            admin_id,
            "oldPassword1",
            "owner@example.com",
            "newPassword1",
        )
        .await
        .unwrap();

        let admin = AdminUserRepository::new(db.pool())
            .get_by_id(admin_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.email, "owner@example.com");
        assert!(verify_password("newPassword1", &admin.password).is_ok());
        assert!(verify_password("oldPassword1", &admin.password).is_err());

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("newPassword1"));
    }

    #[tokio::test]
    async fn test_rotation_revokes_sessions() {
        let (db, _mailer, notifier, admin_id) = setup().await;

        let tokens = RefreshTokenRepository::new(db.pool());
        tokens
            .create(&NewRefreshToken::new(
                admin_id,
                "session-a",
                "2099-12-31 23:59:59",
            ))
            .await
            .unwrap();
        tokens
            .create(&NewRefreshToken::new(
                admin_id,
                "session-b",
                "2099-12-31 23:59:59",
            ))
            .await
            .unwrap();

        let revoked = rotate_credentials(
            &db,
            &notifier,
            admin_id,
            "oldPassword1",
            "owner@example.com",
            "newPassword1",
        )
        .await
        .unwrap();

        assert_eq!(revoked, 2);
        assert!(tokens.get_valid_token("session-a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_current_password_rejected() {
        let (db, mailer, notifier, admin_id) = setup().await;

        let result = rotate_credentials(
            &db,
            &notifier,
            admin_id,
            "wrongPassword",
            "owner@example.com",
            "newPassword1",
        )
        .await;

        assert!(matches!(result, Err(FolioError::Auth(_))));
        assert_eq!(mailer.count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_new_email_rejected() {
        let (db, mailer, notifier, admin_id) = setup().await;

        let result = rotate_credentials(
            &db,
            &notifier,
            admin_id,
            "oldPassword1",
            "not-an-email",
            "newPassword1",
        )
        .await;

        assert!(matches!(result, Err(FolioError::Validation(_))));
        assert_eq!(mailer.count(), 0);
    }

    #[tokio::test]
    async fn test_short_new_password_rejected() {
        let (db, _mailer, notifier, admin_id) = setup().await;

        let result = rotate_credentials(
            &db,
            &notifier,
            admin_id,
            "oldPassword1",
            "owner@example.com",
            "short",
        )
        .await;

        assert!(matches!(result, Err(FolioError::Validation(_))));
    }

    #[tokio::test]
    async fn test_failed_delivery_keeps_old_credentials() {
        let (db, _mailer, _notifier, admin_id) = setup().await;
        let failing =
            CredentialNotifier::with_transport(Arc::new(MemoryMailer::failing()), &smtp_config());

        let tokens = RefreshTokenRepository::new(db.pool());
        tokens
            .create(&NewRefreshToken::new(
                admin_id,
                "session-a",
                "2099-12-31 23:59:59",
            ))
            .await
            .unwrap();

        let result = rotate_credentials(
            &db,
            &failing,
            admin_id,
            "oldPassword1",
            "owner@example.com",
            "newPassword1",
        )
        .await;
        assert!(matches!(result, Err(FolioError::Delivery(_))));

        let admin = AdminUserRepository::new(db.pool())
            .get_by_id(admin_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.email, "admin@example.com");
        assert!(verify_password("oldPassword1", &admin.password).is_ok());
        assert!(tokens.get_valid_token("session-a").await.unwrap().is_some());
    }
}
