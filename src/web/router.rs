//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    bulk_delete, bulk_mark_read, create_experience, create_project, create_skill,
    delete_experience, delete_message, delete_project, delete_skill, get_contact_info,
    get_profile, get_public_contact_info, list_experience, list_messages, list_projects,
    list_skills, login, logout, me, put_contact_info, put_profile, refresh, set_read_state,
    submit_message, update_credentials, update_experience, update_project, update_skill,
    AppState,
};
use super::middleware::{
    api_rate_limit, create_cors_layer, jwt_auth, login_rate_limit, security_headers, JwtState,
    RateLimitState,
};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    rate_limit: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    // Public routes (rate limited per IP)
    let api_limiter = rate_limit.clone();
    let public_routes = Router::new()
        .route("/messages", post(submit_message))
        .route("/contact-info", get(get_public_contact_info))
        .route("/profile", get(get_profile))
        .route("/projects", get(list_projects))
        .route("/experience", get(list_experience))
        .route("/skills", get(list_skills))
        .layer(middleware::from_fn(move |req, next| {
            let state = api_limiter.clone();
            api_rate_limit(state, req, next)
        }));

    // Login gets its own, much tighter limiter
    let login_limiter = rate_limit.clone();
    let login_routes = Router::new()
        .route("/login", post(login))
        .layer(middleware::from_fn(move |req, next| {
            let state = login_limiter.clone();
            login_rate_limit(state, req, next)
        }));

    let auth_routes = Router::new()
        .merge(login_routes)
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        .route("/me", get(me));

    // Admin routes; each handler requires a Bearer token via AuthUser
    let admin_routes = Router::new()
        .route("/messages", get(list_messages))
        .route("/messages/:id/read", patch(set_read_state))
        .route("/messages/:id", delete(delete_message))
        .route("/messages/bulk/read", post(bulk_mark_read))
        .route("/messages/bulk/delete", post(bulk_delete))
        .route("/contact-info", get(get_contact_info).put(put_contact_info))
        .route("/profile", put(put_profile))
        .route("/projects", post(create_project))
        .route("/projects/:id", put(update_project).delete(delete_project))
        .route("/experience", post(create_experience))
        .route(
            "/experience/:id",
            put(update_experience).delete(delete_experience),
        )
        .route("/skills", post(create_skill))
        .route("/skills/:id", put(update_skill).delete(delete_skill))
        .route("/credentials", post(update_credentials));

    let api_routes = Router::new()
        .merge(public_routes)
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes);

    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// OpenAPI document for the annotated endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::handlers::messages::submit_message,
        crate::web::handlers::messages::list_messages,
        crate::web::handlers::messages::set_read_state,
        crate::web::handlers::messages::delete_message,
        crate::web::handlers::messages::bulk_mark_read,
        crate::web::handlers::messages::bulk_delete,
        crate::web::handlers::credentials::update_credentials,
    ),
    components(schemas(
        crate::web::dto::ContactMessageRequest,
        crate::web::dto::ReadStateRequest,
        crate::web::dto::BulkIdsRequest,
        crate::web::dto::UpdateCredentialsRequest,
        crate::web::dto::MessageResponse,
        crate::web::dto::MessageListData,
        crate::web::dto::UpdatedCountResponse,
        crate::web::dto::DeletedCountResponse,
        crate::web::dto::CredentialsUpdatedResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "messages", description = "Contact message workflow"),
        (name = "credentials", description = "Admin credential rotation")
    ),
    servers(
        (url = "/api", description = "API root")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

/// Create a router serving the frontend bundle, if present.
///
/// Unknown paths fall back to index.html so client-side routing works.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let path = std::path::Path::new(static_path);
    if !path.is_dir() {
        tracing::warn!(path = %static_path, "Static directory not found, skipping");
        return None;
    }

    let index = path.join("index.html");
    let serve_dir = ServeDir::new(path).fallback(ServeFile::new(index));

    Some(Router::new().fallback_service(serve_dir))
}
