//! API error handling for the folio web layer.
//!
//! Failures serialize as `{"success": false, "error": .., "code": ..}`
//! with an optional `details` list carrying field-level validation
//! messages. Handlers return [`ApiError`] and the envelope stays uniform
//! across every route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Machine-readable codes carried in the failure envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request, e.g. unparseable JSON (400).
    BadRequest,
    /// Missing, invalid, or expired credentials (401).
    Unauthorized,
    /// The addressed resource does not exist (404).
    NotFound,
    /// Well-formed input that broke a validation rule (422).
    ValidationError,
    /// Client exceeded a rate limit (429).
    TooManyRequests,
    /// Something on our side broke (500).
    InternalError,
    /// The SMTP relay would not take our mail (502).
    DeliveryFailed,
}

impl ErrorCode {
    /// The HTTP status each code rides on.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DeliveryFailed => StatusCode::BAD_GATEWAY,
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending request field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure envelope body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always false.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Field-level details (validation failures only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Error a handler returns, turned into a response by `IntoResponse`.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Pair a code with its user-facing message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// 422 without field details.
    pub fn validation_message(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// 429 with the given message.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooManyRequests, message)
    }

    /// 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// 502 for a failed outbound mail.
    pub fn delivery_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeliveryFailed, message)
    }

    /// Create a validation error with field-level details.
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }

    /// Create a validation error from validator::ValidationErrors.
    ///
    /// Every failing field contributes one entry per broken rule, sorted
    /// by field name so clients and tests see a stable order.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                details.push(FieldError::new(field.to_string(), message));
            }
        }
        details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        Self::validation(details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            success: false,
            error: self.message,
            code: self.code,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crate::FolioError> for ApiError {
    fn from(err: crate::FolioError) -> Self {
        match &err {
            crate::FolioError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            crate::FolioError::NotFound(_) => ApiError::not_found(err.to_string()),
            crate::FolioError::Validation(msg) => ApiError::validation_message(msg.clone()),
            crate::FolioError::Delivery(msg) => {
                tracing::error!("Mail delivery failed: {}", msg);
                ApiError::delivery_failed("Could not deliver the notification email")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
