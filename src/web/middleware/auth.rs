//! JWT checks for the admin routes.
//!
//! The router injects [`JwtState`] into request extensions via [`jwt_auth`],
//! and handlers opt in to authentication by taking an [`AuthUser`] argument.
//! Access tokens are short-lived; durable sessions ride on refresh tokens
//! stored server-side.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::web::error::ApiError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Admin ID.
    pub sub: i64,
    /// Admin login email.
    pub email: String,
    /// Unix timestamp the token was minted at.
    pub iat: u64,
    /// Unix timestamp the token stops working at.
    pub exp: u64,
    /// Unique token ID.
    pub jti: String,
}

/// Verification half of the JWT setup, shared across requests.
#[derive(Clone)]
pub struct JwtState {
    /// Key used to check token signatures.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl JwtState {
    /// Derive the verification state from the shared secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        // No clock-skew allowance, an expired token is expired
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor that requires a valid access token.
///
/// Handlers taking this argument reject unauthenticated requests with 401
/// before their body runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts).ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

        // Injected by jwt_auth, absence is a router wiring bug
        let jwt_state = parts
            .extensions
            .get::<Arc<JwtState>>()
            .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

        let token_data = decode::<JwtClaims>(token, &jwt_state.decoding_key, &jwt_state.validation)
            .map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                ApiError::unauthorized("Invalid or expired token")
            })?;

        Ok(AuthUser(token_data.claims))
    }
}

/// Make [`JwtState`] available to extractors downstream of this layer.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn create_test_token(secret: &str, claims: &JwtClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn test_claims(offset_secs: i64) -> JwtClaims {
        let now = chrono::Utc::now().timestamp();
        JwtClaims {
            sub: 1,
            email: "admin@example.com".to_string(),
            iat: now as u64,
            exp: (now + offset_secs) as u64,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn test_jwt_state_validates_expiry_without_leeway() {
        let state = JwtState::new("test-secret");
        assert!(state.validation.validate_exp);
        assert_eq!(state.validation.leeway, 0);
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let claims = test_claims(3600);
        let token = create_test_token(secret, &claims);

        let decoded = decode::<JwtClaims>(&token, &state.decoding_key, &state.validation).unwrap();
        assert_eq!(decoded.claims.sub, 1);
        assert_eq!(decoded.claims.email, "admin@example.com");
        assert_eq!(decoded.claims.jti, claims.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let mut claims = test_claims(-3600);
        claims.iat = (chrono::Utc::now().timestamp() - 7200) as u64;

        let token = create_test_token(secret, &claims);

        assert!(decode::<JwtClaims>(&token, &state.decoding_key, &state.validation).is_err());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let state = JwtState::new("our-secret");

        let token = create_test_token("their-secret", &test_claims(3600));

        assert!(decode::<JwtClaims>(&token, &state.decoding_key, &state.validation).is_err());
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_header() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extractor_accepts_bearer_token() {
        let secret = "extractor-secret";
        let claims = test_claims(600);
        let token = create_test_token(secret, &claims);

        let mut request = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(Arc::new(JwtState::new(secret)));
        let (mut parts, _) = request.into_parts();

        let AuthUser(decoded) = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(decoded.email, claims.email);
        assert_eq!(decoded.jti, claims.jti);
    }
}
