//! Outbound mail for folio.
//!
//! The only mail this server sends is the credential update notification;
//! the transport seam keeps SMTP out of the services so tests can swap in
//! a recording mailer.

mod notifier;
mod transport;

pub use notifier::CredentialNotifier;
pub use transport::{MailTransport, MemoryMailer, OutboundMail, SmtpMailer};
