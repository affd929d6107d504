//! Contact message handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::message::{MessageService, NewContactMessage, DEFAULT_PAGE_SIZE};
use crate::web::dto::{
    ApiResponse, BulkIdsRequest, ContactMessageRequest, DeletedCountResponse, ListMessagesQuery,
    MessageListData, MessageResponse, ReadStateRequest, UpdatedCountResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/messages - Submit a contact message (public).
#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    request_body = ContactMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = MessageResponse),
        (status = 422, description = "Validation failed"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
pub async fn submit_message(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ContactMessageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let service = MessageService::new(&state.db);
    let new_message = NewContactMessage::new(req.name, req.email, req.subject, req.message);
    let message = service.submit(&new_message).await?;

    tracing::info!(id = message.id, "Contact message received");

    Ok(Json(ApiResponse::with_message(
        MessageResponse::from(message),
        "Message sent successfully",
    )))
}

/// GET /api/admin/messages - List messages, newest first.
#[utoipa::path(
    get,
    path = "/admin/messages",
    tag = "messages",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("page_size" = Option<i64>, Query, description = "Messages per page")
    ),
    responses(
        (status = 200, description = "One page of messages", body = MessageListData),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<ApiResponse<MessageListData>>, ApiError> {
    let service = MessageService::new(&state.db);
    let page = service
        .list(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(Json(ApiResponse::new(MessageListData::from(page))))
}

/// PATCH /api/admin/messages/:id/read - Set the read state of a message.
#[utoipa::path(
    patch,
    path = "/admin/messages/{id}/read",
    tag = "messages",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    request_body = ReadStateRequest,
    responses(
        (status = 200, description = "Updated message", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_read_state(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ReadStateRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let service = MessageService::new(&state.db);
    let message = service.set_read_state(id, req.read).await?;

    Ok(Json(ApiResponse::new(MessageResponse::from(message))))
}

/// DELETE /api/admin/messages/:id - Delete a message.
#[utoipa::path(
    delete,
    path = "/admin/messages/{id}",
    tag = "messages",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let service = MessageService::new(&state.db);
    service.delete(id).await?;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/admin/messages/bulk/read - Mark a batch of messages read.
#[utoipa::path(
    post,
    path = "/admin/messages/bulk/read",
    tag = "messages",
    request_body = BulkIdsRequest,
    responses(
        (status = 200, description = "Rows updated", body = UpdatedCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_mark_read(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Json(req): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<UpdatedCountResponse>>, ApiError> {
    let service = MessageService::new(&state.db);
    let updated = service.bulk_mark_read(&req.ids).await?;

    Ok(Json(ApiResponse::new(UpdatedCountResponse { updated })))
}

/// POST /api/admin/messages/bulk/delete - Delete a batch of messages.
#[utoipa::path(
    post,
    path = "/admin/messages/bulk/delete",
    tag = "messages",
    request_body = BulkIdsRequest,
    responses(
        (status = 200, description = "Rows deleted", body = DeletedCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_delete(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Json(req): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<DeletedCountResponse>>, ApiError> {
    let service = MessageService::new(&state.db);
    let deleted = service.bulk_delete(&req.ids).await?;

    Ok(Json(ApiResponse::new(DeletedCountResponse { deleted })))
}
