//! Web server for the portfolio backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{AuthConfig, ServerConfig};
use crate::db::RefreshTokenRepository;
use crate::mailer::CredentialNotifier;
use crate::Database;

use super::handlers::{AppState, SharedDatabase};
use super::middleware::{JwtState, RateLimitState};
use super::router::{
    create_health_router, create_router, create_static_router, create_swagger_router,
};

/// The assembled HTTP server, ready to bind and serve.
pub struct WebServer {
    /// Address to bind.
    addr: SocketAddr,
    /// Handler state shared across requests.
    app_state: Arc<AppState>,
    /// Token verification state.
    jwt_state: Arc<JwtState>,
    /// Per-IP throttling state.
    rate_limit: Arc<RateLimitState>,
    /// Listener settings, kept for router assembly.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        server_config: &ServerConfig,
        auth_config: &AuthConfig,
        db: SharedDatabase,
        notifier: Arc<CredentialNotifier>,
    ) -> Self {
        let addr = format!("{}:{}", server_config.host, server_config.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = AppState::new(
            db,
            &auth_config.jwt_secret,
            auth_config.access_token_expiry_secs,
            auth_config.refresh_token_expiry_days,
            notifier,
        );

        let jwt_state = Arc::new(JwtState::new(&auth_config.jwt_secret));
        let rate_limit = Arc::new(RateLimitState::new(
            server_config.login_rate_limit,
            server_config.api_rate_limit,
        ));

        Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            rate_limit,
            server_config: server_config.clone(),
        }
    }

    /// Create a new web server from a raw Database.
    pub fn from_database(
        server_config: &ServerConfig,
        auth_config: &AuthConfig,
        db: Database,
        notifier: CredentialNotifier,
    ) -> Self {
        Self::new(server_config, auth_config, Arc::new(db), Arc::new(notifier))
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Spawn the hourly sweep that deletes expired and revoked refresh
    /// tokens.
    fn start_token_cleanup_task(db: SharedDatabase) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let sweep = RefreshTokenRepository::new(db.pool()).cleanup_expired().await;
                match sweep {
                    Ok(0) => tracing::debug!("No dead refresh tokens to sweep"),
                    Ok(count) => {
                        tracing::info!(deleted_count = count, "Swept dead refresh tokens")
                    }
                    Err(e) => tracing::warn!(error = %e, "Refresh token sweep failed"),
                }
            }
        });
    }

    /// Assemble the full router and hand back the pieces `run` needs.
    fn assemble(self) -> (SocketAddr, Router, SharedDatabase, Arc<RateLimitState>) {
        let db = self.app_state.db.clone();

        let mut router = create_router(
            self.app_state,
            self.jwt_state,
            self.rate_limit.clone(),
            &self.server_config.cors_origins,
        )
        .merge(create_health_router())
        .merge(create_swagger_router());

        if self.server_config.serve_static {
            if let Some(static_router) = create_static_router(&self.server_config.static_path) {
                router = router.merge(static_router);
            }
        }

        let router = router.layer(CompressionLayer::new());

        (self.addr, router, db, self.rate_limit)
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let (addr, router, db, rate_limit) = self.assemble();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        // Background tasks start after a successful bind
        Self::start_token_cleanup_task(db);
        rate_limit.start_cleanup_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let (addr, router, db, rate_limit) = self.assemble();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_token_cleanup_task(db);
        rate_limit.start_cleanup_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            let service = router.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, service).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
