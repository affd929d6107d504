//! Contact info handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::contact::ContactInfoRepository;
use crate::web::dto::{
    ApiResponse, ContactInfoRequest, ContactInfoResponse, PublicContactInfoResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/contact-info - Public contact details.
pub async fn get_public_contact_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PublicContactInfoResponse>>, ApiError> {
    let repo = ContactInfoRepository::new(state.db.pool());
    let info = repo
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("Contact info not found"))?;

    Ok(Json(ApiResponse::new(PublicContactInfoResponse::from(info))))
}

/// GET /api/admin/contact-info - Full contact record.
pub async fn get_contact_info(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<ApiResponse<ContactInfoResponse>>, ApiError> {
    let repo = ContactInfoRepository::new(state.db.pool());
    let info = repo
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("Contact info not found"))?;

    Ok(Json(ApiResponse::new(ContactInfoResponse::from(info))))
}

/// PUT /api/admin/contact-info - Replace the contact record.
pub async fn put_contact_info(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedJson(req): ValidatedJson<ContactInfoRequest>,
) -> Result<Json<ApiResponse<ContactInfoResponse>>, ApiError> {
    let repo = ContactInfoRepository::new(state.db.pool());
    let info = repo.upsert(&req.into_input()).await?;

    Ok(Json(ApiResponse::new(ContactInfoResponse::from(info))))
}
