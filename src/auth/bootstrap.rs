//! Default admin bootstrap.
//!
//! Runs once at startup and guarantees the dashboard has an account to
//! log into. The check-then-create is gated on the admins table being
//! empty, so repeated startups never create a second account.

use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::config::AuthConfig;
use crate::db::{AdminUser, AdminUserRepository, NewAdminUser};
use crate::{Database, FolioError, Result};

/// Ensure an admin account exists, creating one from the configured
/// default credentials when the table is empty.
///
/// Returns the existing or newly created account.
pub async fn ensure_default_admin(db: &Database, config: &AuthConfig) -> Result<AdminUser> {
    let repo = AdminUserRepository::new(db.pool());

    if let Some(admin) = repo.first().await? {
        return Ok(admin);
    }

    let hash = hash_password(&config.default_admin_password)
        .map_err(|e| FolioError::Config(format!("default admin password: {e}")))?;

    let admin = repo
        .create(&NewAdminUser::new(&config.default_admin_email, hash))
        .await?;

    info!("Created admin account {}", admin.email);
    if config.default_admin_password == crate::config::AuthConfig::default().default_admin_password
    {
        warn!("Admin account uses the built-in default password; change it from the dashboard");
    }

    Ok(admin)
}
