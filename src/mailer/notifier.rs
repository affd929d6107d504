//! Credential update notifications.
//!
//! When the admin changes their sign-in credentials, the new values are
//! mailed in plain text to a backup address so a forgotten password never
//! locks the owner out. Delivery happens before the database is touched;
//! a failed send means the old credentials stay in effect.

use std::sync::Arc;

use super::transport::{MailTransport, OutboundMail, SmtpMailer};
use crate::config::SmtpConfig;
use crate::Result;

const CREDENTIAL_SUBJECT: &str = "Portfolio admin credentials updated";

/// Mails new admin credentials to the configured backup address.
pub struct CredentialNotifier {
    transport: Arc<dyn MailTransport>,
    backup_address: String,
}

impl CredentialNotifier {
    /// Build a notifier over a real SMTP transport.
    pub fn from_config(config: &SmtpConfig) -> Result<Self> {
        let transport = SmtpMailer::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Build a notifier over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn MailTransport>, config: &SmtpConfig) -> Self {
        Self {
            transport,
            backup_address: config.backup_address.clone(),
        }
    }

    /// Mail the new credentials to the backup address.
    ///
    /// Callers must not persist the new credentials until this returns Ok.
    pub async fn send_credential_update(&self, email: &str, password: &str) -> Result<()> {
        let changed_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let body = format!(
            "The sign-in credentials for your portfolio dashboard were changed on {changed_at}.\n\
             \n\
             Email:    {email}\n\
             Password: {password}\n\
             \n\
             Keep this mail somewhere safe. If you did not make this change, sign in\n\
             with these credentials and rotate them again."
        );

        let mail = OutboundMail {
            to: self.backup_address.clone(),
            subject: CREDENTIAL_SUBJECT.to_string(),
            body,
        };
        self.transport.send(&mail).await?;

        tracing::info!(to = %self.backup_address, "credential update notification sent");
        Ok(())
    }
}
