//! Integration tests for login, token refresh, logout and the `me` endpoint,
//! exercised through the assembled router.

use axum_test::TestServer;
use folio::db::{AdminUserRepository, NewAdminUser};
use folio::mailer::{CredentialNotifier, MemoryMailer};
use folio::web::handlers::AppState;
use folio::web::middleware::{JwtState, RateLimitState};
use folio::web::router::create_router;
use folio::{hash_password, Database, SmtpConfig};
use serde_json::{json, Value};
use std::sync::Arc;

const JWT_SECRET: &str = "test-secret-key-for-testing-only";
const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct-horse-9";

fn test_smtp_config() -> SmtpConfig {
    SmtpConfig {
        host: "smtp.example.com".to_string(),
        port: 587,
        username: "mailer@example.com".to_string(),
        password: "app-password".to_string(),
        from_address: "mailer@example.com".to_string(),
        backup_address: "backup@example.com".to_string(),
        timeout_secs: 10,
    }
}

/// Create a test server with an in-memory database and a seeded admin.
async fn create_test_server() -> (TestServer, Arc<Database>) {
    create_test_server_with_login_limit(1000).await
}

/// Same, but with a configurable login rate limit (per minute).
async fn create_test_server_with_login_limit(login_limit: u32) -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let hash = hash_password(ADMIN_PASSWORD).expect("Failed to hash password");
    AdminUserRepository::new(db.pool())
        .create(&NewAdminUser::new(ADMIN_EMAIL, hash))
        .await
        .expect("Failed to seed admin");

    let notifier = Arc::new(CredentialNotifier::with_transport(
        Arc::new(MemoryMailer::new()),
        &test_smtp_config(),
    ));

    let app_state = Arc::new(AppState::new(db.clone(), JWT_SECRET, 900, 7, notifier));
    let jwt_state = Arc::new(JwtState::new(JWT_SECRET));
    let rate_limit = Arc::new(RateLimitState::new(login_limit, 1000));

    let router = create_router(app_state, jwt_state, rate_limit, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Login and return (access_token, refresh_token).
async fn login(server: &TestServer) -> (String, String) {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();
    (access, refresh)
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
    assert_eq!(body["data"]["expires_in"], json!(900));
    assert_eq!(body["data"]["admin"]["email"], ADMIN_EMAIL);
    assert!(body["data"]["admin"]["id"].is_i64());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": "wrong-password"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_error() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": ADMIN_PASSWORD
        }))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    // Same message as a wrong password, so the response does not
    // reveal which accounts exist
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_empty_fields() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "",
            "password": ""
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["error"], "Email and password are required");
}

// ============================================================================
// Refresh and logout
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_token() {
    let (server, _db) = create_test_server().await;
    let (_access, refresh) = login(&server).await;

    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["access_token"].is_string());
    let new_refresh = body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, refresh);

    // The presented token died with the exchange
    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": "no-such-token"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let (server, _db) = create_test_server().await;
    let (access, refresh) = login(&server).await;

    let response = server
        .post("/api/auth/logout")
        .authorization_bearer(&access)
        .json(&json!({"refresh_token": refresh}))
        .await;

    response.assert_status_ok();

    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_unknown_token_still_succeeds() {
    let (server, _db) = create_test_server().await;
    let (access, _refresh) = login(&server).await;

    let response = server
        .post("/api/auth/logout")
        .authorization_bearer(&access)
        .json(&json!({"refresh_token": "never-issued"}))
        .await;

    response.assert_status_ok();
}

// ============================================================================
// Me
// ============================================================================

#[tokio::test]
async fn test_me_includes_unread_count() {
    let (server, _db) = create_test_server().await;
    let (access, _refresh) = login(&server).await;

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&access)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert_eq!(body["data"]["unread_messages"], json!(0));

    // A new contact message shows up as unread
    server
        .post("/api/messages")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "Is this thing on?"
        }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&access)
        .await;

    let body: Value = response.json();
    assert_eq!(body["data"]["unread_messages"], json!(1));
}

#[tokio::test]
async fn test_me_requires_auth() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/auth/me").await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Missing authorization");
}

#[tokio::test]
async fn test_me_rejects_garbage_token() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid or expired token");
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_login_rate_limit_returns_429() {
    let (server, _db) = create_test_server_with_login_limit(2).await;

    // The first two attempts get through to the handler
    for _ in 0..2 {
        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": ADMIN_EMAIL, "password": "wrong"}))
            .await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }

    // The third attempt within the same minute is cut off before the handler
    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": ADMIN_EMAIL, "password": "wrong"}))
        .await;

    response.assert_status(axum::http::StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], "TOO_MANY_REQUESTS");
    assert_eq!(body["error"], "Too many login attempts. Please try again later.");
}
