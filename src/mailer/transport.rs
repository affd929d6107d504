//! Mail transport for folio.
//!
//! Outbound mail goes through the [`MailTransport`] trait so the rest of
//! the crate stays independent of the SMTP wiring. [`SmtpMailer`] is the
//! real transport; [`MemoryMailer`] records mail for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::{FolioError, Result};

/// A plain-text mail ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Sends outbound mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one mail. Failures surface as [`FolioError::Delivery`].
    async fn send(&self, mail: &OutboundMail) -> Result<()>;
}

/// SMTP transport over a STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build the transport from SMTP settings.
    ///
    /// Fails when the relay host cannot be turned into a transport; the
    /// caller treats this as a startup error.
    pub fn from_config(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                FolioError::Config(format!("invalid SMTP relay {}: {}", config.host, e))
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        FolioError::Delivery(e.to_string())
                    })?,
            )
            .to(mail.to.parse().map_err(
                |e: lettre::address::AddressError| FolioError::Delivery(e.to_string()),
            )?)
            .subject(&mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| FolioError::Delivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| FolioError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// In-memory transport that records mail instead of sending it.
///
/// Tests use [`MemoryMailer::new`] to capture sends and
/// [`MemoryMailer::failing`] to exercise delivery failures.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutboundMail>>>,
    fail: bool,
}

impl MemoryMailer {
    /// Create a recording transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose sends always fail.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// All mail recorded so far.
    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of mails recorded.
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for MemoryMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<()> {
        if self.fail {
            return Err(FolioError::Delivery("simulated SMTP failure".to_string()));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_smtp_mailer_builds_from_config() {
        let mailer = SmtpMailer::from_config(&smtp_config());
        assert!(mailer.is_ok());
    }

    #[tokio::test]
    async fn test_memory_mailer_records_sends() {
        let mailer = MemoryMailer::new();
        assert_eq!(mailer.count(), 0);

        mailer
            .send(&OutboundMail {
                to: "backup@example.com".to_string(),
                subject: "Hello".to_string(),
                body: "World".to_string(),
            })
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "backup@example.com");
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn test_failing_mailer_returns_delivery_error() {
        let mailer = MemoryMailer::failing();
        let result = mailer
            .send(&OutboundMail {
                to: "backup@example.com".to_string(),
                subject: "Hello".to_string(),
                body: "World".to_string(),
            })
            .await;

        assert!(matches!(result, Err(FolioError::Delivery(_))));
        assert_eq!(mailer.count(), 0);
    }
}
