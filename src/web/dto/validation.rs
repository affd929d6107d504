//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Deserializes the body as JSON and runs the `validator` rules on it.
/// A failure reports every broken field at once in the error envelope,
/// so a form can show all problems in a single round trip.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate an optional URL field.
///
/// Empty (or whitespace-only) means "absent" and passes; anything else
/// must parse as an http(s) URL.
pub fn optional_url(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        _ => Err(validator::ValidationError::new("optional_url")
            .with_message("Must be a valid http(s) URL".into())),
    }
}

/// Validate an optional phone field (empty means absent).
pub fn optional_phone(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    if value.chars().count() > crate::contact::MAX_PHONE_LENGTH {
        return Err(validator::ValidationError::new("optional_phone")
            .with_message("Phone number must be at most 20 characters".into()));
    }
    Ok(())
}

/// Validate a YYYY-MM date string.
pub fn year_month(value: &str) -> Result<(), validator::ValidationError> {
    let valid = value.len() == 7
        && value.is_ascii()
        && value.as_bytes()[4] == b'-'
        && value[..4].chars().all(|c| c.is_ascii_digit())
        && value[5..].chars().all(|c| c.is_ascii_digit())
        && matches!(value[5..].parse::<u8>(), Ok(1..=12));

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("year_month")
            .with_message("Must be a YYYY-MM date".into()))
    }
}

/// Validate an optional YYYY-MM date string (empty means absent).
pub fn year_month_or_empty(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    year_month(value)
}

/// Collapse an empty or whitespace-only string to None.
pub fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_url_accepts_empty_and_http() {
        assert!(optional_url("").is_ok());
        assert!(optional_url("   ").is_ok());
        assert!(optional_url("https://github.com/example").is_ok());
        assert!(optional_url("http://example.com").is_ok());
    }

    #[test]
    fn test_optional_url_rejects_garbage() {
        assert!(optional_url("not a url").is_err());
        assert!(optional_url("ftp://example.com/file").is_err());
        assert!(optional_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_optional_phone() {
        assert!(optional_phone("").is_ok());
        assert!(optional_phone("+49 30 1234567").is_ok());
        assert!(optional_phone(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_year_month() {
        assert!(year_month("2024-01").is_ok());
        assert!(year_month("1999-12").is_ok());
        assert!(year_month("2024-13").is_err());
        assert!(year_month("2024-00").is_err());
        assert!(year_month("2024-1").is_err());
        assert!(year_month("24-01").is_err());
        assert!(year_month("2024/01").is_err());
    }

    #[test]
    fn test_year_month_or_empty() {
        assert!(year_month_or_empty("").is_ok());
        assert!(year_month_or_empty("2023-08").is_ok());
        assert!(year_month_or_empty("soon").is_err());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(String::new()), None);
        assert_eq!(blank_to_none("  ".to_string()), None);
        assert_eq!(blank_to_none("x".to_string()), Some("x".to_string()));
    }
}
