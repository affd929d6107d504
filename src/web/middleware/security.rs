//! Security headers middleware.

use axum::{
    body::Body,
    http::{header::HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers attached to every response.
///
/// Strict-Transport-Security is left to the reverse proxy since it
/// requires HTTPS.
const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
];

/// Security headers middleware.
///
/// API responses additionally get `Cache-Control: no-store` so inbox
/// contents and tokens never land in shared caches. Static assets keep
/// whatever caching the file service decides.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let is_api = req.uri().path().starts_with("/api");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    if is_api && !headers.contains_key("Cache-Control") {
        headers.insert(
            "Cache-Control",
            HeaderValue::from_static("no-store, max-age=0"),
        );
    }

    response
}
