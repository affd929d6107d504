//! Admin password hashing.
//!
//! The single admin account stores its password as an Argon2id PHC string.
//! Hashes are self-describing, so parameter changes here only affect newly
//! written hashes; verification always honors the parameters embedded in the
//! stored string.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

// Argon2id cost settings for newly written hashes.
const MEMORY_KIB: u32 = 65536;
const ITERATIONS: u32 = 3;
const LANES: u32 = 4;

/// Errors from hashing or checking a password.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Longer than [`MAX_PASSWORD_LENGTH`].
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// The hasher itself failed.
    #[error("could not hash password: {0}")]
    HashError(String),

    /// The stored value is not a parseable PHC string.
    #[error("stored password hash is malformed")]
    InvalidHash,

    /// The password does not match the stored hash.
    #[error("password does not match")]
    VerificationFailed,
}

fn hasher() -> Argon2<'static> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// The length bounds are enforced before hashing, so callers that already
/// validated input only pay for the hash.
///
/// # Examples
///
/// ```
/// use folio::hash_password;
///
/// let hash = hash_password("rotated-admin-pw").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash string.
///
/// # Examples
///
/// ```
/// use folio::{hash_password, verify_password};
///
/// let hash = hash_password("rotated-admin-pw").unwrap();
/// assert!(verify_password("rotated-admin-pw", &hash).is_ok());
/// assert!(verify_password("guessed-admin-pw", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Cost parameters come from the parsed hash, not from hasher()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Enforce the password length bounds.
///
/// Lengths are counted in characters to match what the API reports back to
/// the caller, not in bytes.
///
/// # Examples
///
/// ```
/// use folio::validate_password;
///
/// assert!(validate_password("2short!").is_err());
/// assert!(validate_password("long enough now").is_ok());
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let chars = password.chars().count();
    if chars < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if chars > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("first-admin-pw").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let a = hash_password("repeat-me-pw").unwrap();
        let b = hash_password("repeat-me-pw").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("repeat-me-pw", &a).is_ok());
        assert!(verify_password("repeat-me-pw", &b).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("the-real-one").unwrap();

        let result = verify_password("the-wrong-one", &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let result = verify_password("whatever-pw", "plainly-not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            validate_password("seven77"),
            Err(PasswordError::TooShort)
        ));
        assert!(validate_password("eight888").is_ok());

        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(matches!(
            validate_password(&"x".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordError::TooLong)
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Eight characters, twenty-two bytes
        let password = "ぱすわーどだよ!";
        assert_eq!(password.chars().count(), 8);
        assert!(validate_password(password).is_ok());

        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_hash_rejects_out_of_bounds_input() {
        assert!(matches!(
            hash_password("tiny"),
            Err(PasswordError::TooShort)
        ));
        assert!(matches!(
            hash_password(&"y".repeat(200)),
            Err(PasswordError::TooLong)
        ));
    }

    #[test]
    fn test_symbols_survive_roundtrip() {
        let password = "p@$$w0rd?!*(){}";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PasswordError::TooShort.to_string(),
            "password must be at least 8 characters"
        );
        assert_eq!(
            PasswordError::TooLong.to_string(),
            "password must be at most 128 characters"
        );
        assert_eq!(
            PasswordError::VerificationFailed.to_string(),
            "password does not match"
        );
    }
}
