//! Per-IP request throttling.
//!
//! Two independent pools: a tight one for login attempts and a looser one
//! for the public endpoints. Authenticated admin routes are not throttled.
//! Each pool lazily creates one Governor limiter per client IP and a
//! background task sweeps out idle entries.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::web::error::ApiError;

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// A map of per-IP limiters sharing one quota.
struct LimiterPool {
    limiters: RwLock<HashMap<String, Arc<IpRateLimiter>>>,
    per_minute: NonZeroU32,
}

impl LimiterPool {
    fn new(per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            // A zero in the config clamps to one request per minute
            per_minute: NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN),
        }
    }

    fn allow(&self, ip: &str) -> bool {
        self.limiter_for(ip).check().is_ok()
    }

    fn limiter_for(&self, ip: &str) -> Arc<IpRateLimiter> {
        if let Some(limiter) = self.limiters.read().unwrap().get(ip) {
            return limiter.clone();
        }

        let mut limiters = self.limiters.write().unwrap();
        // Another request may have inserted while we waited for the lock
        if let Some(limiter) = limiters.get(ip) {
            return limiter.clone();
        }

        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(self.per_minute)));
        limiters.insert(ip.to_string(), limiter.clone());
        limiter
    }

    fn sweep(&self) {
        self.limiters
            .write()
            .unwrap()
            .retain(|_, limiter| Arc::strong_count(limiter) > 1);
    }
}

/// Shared throttling state for the router.
#[derive(Clone)]
pub struct RateLimitState {
    login: Arc<LimiterPool>,
    api: Arc<LimiterPool>,
}

impl RateLimitState {
    /// Build the two pools from their per-minute limits.
    pub fn new(login_per_minute: u32, api_per_minute: u32) -> Self {
        Self {
            login: Arc::new(LimiterPool::new(login_per_minute)),
            api: Arc::new(LimiterPool::new(api_per_minute)),
        }
    }

    /// Whether this IP may make another login attempt.
    pub fn check_login(&self, ip: &str) -> bool {
        self.login.allow(ip)
    }

    /// Whether this IP may make another public API request.
    pub fn check_api(&self, ip: &str) -> bool {
        self.api.allow(ip)
    }

    /// Drop limiters no longer referenced by in-flight requests.
    pub fn cleanup(&self) {
        self.login.sweep();
        self.api.sweep();
    }

    /// Spawn the periodic sweep task.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(300)).await;
                self.cleanup();
            }
        });
    }
}

/// Best-effort client IP, honoring reverse-proxy headers first.
fn client_ip(req: &Request<Body>) -> String {
    let headers = req.headers();

    // Behind a proxy the chain's first entry is the real caller
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    if let Some(ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Throttle login attempts before the handler sees them.
pub async fn login_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if !state.check_login(&ip) {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Throttle public endpoints before the handler sees them.
pub async fn api_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if !state.check_api(&ip) {
        tracing::warn!(ip = %ip, "API rate limit exceeded");
        return ApiError::too_many_requests("Too many requests. Please try again later.")
            .into_response();
    }

    next.run(req).await
}
