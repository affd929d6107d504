//! Folio - personal portfolio backend.
//!
//! A small web backend for a personal portfolio site: public contact form
//! and content endpoints, an authenticated admin dashboard for the message
//! inbox and content management, and a credential rotation workflow that
//! emails the new credentials to a backup address before persisting them.

pub mod auth;
pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod logging;
pub mod mailer;
pub mod message;
pub mod portfolio;
pub mod web;

pub use auth::{
    ensure_default_admin, hash_password, rotate_credentials, validate_password, verify_password,
    PasswordError,
};
pub use config::{AuthConfig, Config, ServerConfig, SmtpConfig};
pub use db::{AdminUser, AdminUserRepository, Database, NewAdminUser};
pub use error::{FolioError, Result};
pub use mailer::{CredentialNotifier, MailTransport, MemoryMailer, OutboundMail, SmtpMailer};
pub use message::{ContactMessage, MessageService, NewContactMessage};
pub use web::WebServer;
