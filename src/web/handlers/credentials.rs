//! Credential rotation handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::rotate_credentials;
use crate::web::dto::{ApiResponse, CredentialsUpdatedResponse, UpdateCredentialsRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/admin/credentials - Rotate the admin login credentials.
///
/// The notification email must be delivered before anything is persisted;
/// a delivery failure leaves the account and sessions untouched.
#[utoipa::path(
    post,
    path = "/admin/credentials",
    tag = "credentials",
    request_body = UpdateCredentialsRequest,
    responses(
        (status = 200, description = "Credentials rotated", body = CredentialsUpdatedResponse),
        (status = 401, description = "Unauthorized or wrong current password"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Notification email could not be delivered")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_credentials(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateCredentialsRequest>,
) -> Result<Json<ApiResponse<CredentialsUpdatedResponse>>, ApiError> {
    let revoked_sessions = rotate_credentials(
        &state.db,
        &state.notifier,
        claims.sub,
        &req.current_password,
        &req.new_email,
        &req.new_password,
    )
    .await?;

    let response = CredentialsUpdatedResponse {
        email: req.new_email,
        revoked_sessions,
    };

    Ok(Json(ApiResponse::with_message(
        response,
        "Credentials updated. A confirmation was sent to the backup address.",
    )))
}
