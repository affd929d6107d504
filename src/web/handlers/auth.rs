//! Login, token refresh, logout, and the `me` view.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::auth::verify_password;
use crate::db::{AdminUserRepository, NewRefreshToken, RefreshTokenRepository};
use crate::mailer::CredentialNotifier;
use crate::message::MessageService;
use crate::web::dto::{
    AdminInfo, ApiResponse, LoginRequest, LoginResponse, LogoutRequest, MeResponse,
    RefreshRequest, RefreshResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, JwtClaims};
use crate::Database;

/// Shared database handle for Web API.
pub type SharedDatabase = Arc<Database>;

/// State every handler can reach through the `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the sqlx pool inside is already shareable).
    pub db: SharedDatabase,
    /// Signing half of the JWT setup.
    pub encoding_key: EncodingKey,
    /// Lifetime of an access token, in seconds.
    pub access_token_expiry: u64,
    /// Lifetime of a refresh token, in days.
    pub refresh_token_expiry: u64,
    /// Mails the backup address when credentials rotate.
    pub notifier: Arc<CredentialNotifier>,
}

impl AppState {
    /// Bundle the pieces handlers need.
    pub fn new(
        db: SharedDatabase,
        jwt_secret: &str,
        access_expiry: u64,
        refresh_expiry: u64,
        notifier: Arc<CredentialNotifier>,
    ) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
            notifier,
        }
    }

    /// Generate an access token for an admin.
    pub fn generate_access_token(&self, admin_id: i64, email: &str) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: admin_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Mint an opaque refresh token; validity lives in the database row.
    pub fn generate_refresh_token(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Store a refresh token with the configured expiry.
    async fn store_refresh_token(&self, admin_id: i64, token: &str) -> Result<(), ApiError> {
        let repo = RefreshTokenRepository::new(self.db.pool());
        let expires_at =
            chrono::Utc::now() + chrono::Duration::days(self.refresh_token_expiry as i64);
        let new_token = NewRefreshToken::new(
            admin_id,
            token,
            expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        repo.create(&new_token).await.map_err(|e| {
            tracing::error!("Failed to store refresh token: {}", e);
            ApiError::internal("Failed to create session")
        })?;
        Ok(())
    }
}

/// POST /api/auth/login - Admin login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let repo = AdminUserRepository::new(state.db.pool());
    let admin = repo
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    verify_password(&req.password, &admin.password)
        .map_err(|_| ApiError::unauthorized("Invalid email or password"))?;

    let access_token = state.generate_access_token(admin.id, &admin.email)?;
    let refresh_token = state.generate_refresh_token();
    state.store_refresh_token(admin.id, &refresh_token).await?;

    let response = LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
        },
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/auth/logout - Admin logout.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    // Revoking an unknown token is a no-op
    let repo = RefreshTokenRepository::new(state.db.pool());
    let _ = repo.revoke(&req.refresh_token).await;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/auth/refresh - Refresh access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let tokens = RefreshTokenRepository::new(state.db.pool());
    let token = tokens
        .get_valid_token(&req.refresh_token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let admins = AdminUserRepository::new(state.db.pool());
    let admin = admins
        .get_by_id(token.admin_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Admin not found"))?;

    // Rotate: the presented token dies with this exchange
    let _ = tokens.revoke(&req.refresh_token).await;

    let access_token = state.generate_access_token(admin.id, &admin.email)?;
    let new_refresh_token = state.generate_refresh_token();
    state
        .store_refresh_token(admin.id, &new_refresh_token)
        .await?;

    let response = RefreshResponse {
        access_token,
        refresh_token: new_refresh_token,
        expires_in: state.access_token_expiry,
    };

    Ok(Json(ApiResponse::new(response)))
}

/// GET /api/auth/me - Get the authenticated admin.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let repo = AdminUserRepository::new(state.db.pool());
    let admin = repo
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("Admin not found"))?;

    let unread_messages = MessageService::new(&state.db).unread_count().await?;

    let response = MeResponse {
        id: admin.id,
        email: admin.email,
        created_at: admin.created_at,
        unread_messages,
    };

    Ok(Json(ApiResponse::new(response)))
}
