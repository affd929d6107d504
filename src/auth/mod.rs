//! Authentication module for folio.
//!
//! Password hashing, the default admin bootstrap and credential
//! rotation for the single dashboard account.

mod bootstrap;
mod credentials;
mod password;

pub use bootstrap::ensure_default_admin;
pub use credentials::rotate_credentials;
pub use password::{hash_password, validate_password, verify_password, PasswordError};
