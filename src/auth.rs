//! # Authentication and Authorization
//!
//! This module issues and validates the HS256 session tokens handed out by
//! `/login`, and provides the middleware gating every protected endpoint
//! on the `admin` role.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, forbidden, unauthorized};
use crate::models::user_role::ADMIN_ROLE;
use crate::server::AppState;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject: user ID
    pub sub: Uuid,
    /// Sign-in email, echoed for convenience
    pub email: String,
    /// Role names attached to the user at sign-in time
    pub roles: Vec<String>,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration (unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, roles: Vec<String>, ttl_seconds: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id,
            email,
            roles,
            iat: now,
            exp: now + ttl_seconds as i64,
        }
    }

    /// Whether the claims grant admin access, the sole authorization check
    /// of the application
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

/// Errors from token issue/validation
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token expired")]
    Expired,
}

/// Sign a session token for the given claims.
pub fn issue_token(config: &AppConfig, claims: &Claims) -> Result<String, AuthError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    Ok(encode(&header, claims, &key)?)
}

/// Decode and validate a session token (signature + expiry).
pub fn decode_token(config: &AppConfig, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let data = decode::<Claims>(token, &key, &validation).map_err(|err| {
        if matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ) {
            AuthError::Expired
        } else {
            AuthError::Token(err)
        }
    })?;

    Ok(data.claims)
}

/// Authenticated user extracted from a validated token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

/// Marker type for requests that passed the admin check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAuth;

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware validating the Bearer token and requiring the
/// admin role. 401 for missing/invalid/expired tokens, 403 for
/// authenticated callers without the admin role.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = decode_token(&config, token).map_err(|err| match err {
        AuthError::Expired => unauthorized(Some("Session expired")),
        AuthError::Token(_) => unauthorized(Some("Invalid session token")),
    })?;

    if !claims.is_admin() {
        metrics::counter!("paie_auth_forbidden_total").increment(1);
        return Err(forbidden(Some("Admin role required")));
    }

    tracing::debug!(user_id = %claims.sub, "Authenticated admin request");

    let mut request = request;
    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
        roles: claims.roles,
    });
    request.extensions_mut().insert(AdminAuth);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| unauthorized(Some("Invalid Authorization header")))
        })
        .and_then(|header| {
            header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
        })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Authentication required")))
    }
}

impl<S> FromRequestParts<S> for AdminAuth
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminAuth>()
            .copied()
            .ok_or_else(|| forbidden(Some("Admin role required")))
    }
}
