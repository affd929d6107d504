//! Crate-wide error type.
//!
//! Everything fallible in folio funnels into [`FolioError`]. The web layer
//! translates it into HTTP responses; see `web::error` for that mapping.

use thiserror::Error;

/// Unified error for all folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Bad or unreadable configuration.
    #[error("bad configuration: {0}")]
    Config(String),

    /// Filesystem trouble, usually around the SQLite file or log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A query failed. Wraps the backend's own error text.
    #[error("database error: {0}")]
    Database(String),

    /// The database could not be opened or reached.
    #[error("could not connect to database: {0}")]
    DatabaseConnection(String),

    /// Login or token checks failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Input rejected before touching storage.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Lookup by ID or singleton row came up empty. The payload is the
    /// human-readable name of the missing thing, so Display reads naturally
    /// in a 404 body.
    #[error("{0} not found")]
    NotFound(String),

    /// The SMTP relay rejected or never received an outbound mail.
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

impl From<sqlx::Error> for FolioError {
    fn from(e: sqlx::Error) -> Self {
        FolioError::Database(e.to_string())
    }
}

/// Shorthand result used throughout the crate.
pub type Result<T> = std::result::Result<T, FolioError>;
