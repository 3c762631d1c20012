//! Bearer-credential guard for protected endpoints.
//!
//! # Purpose
//! Extracts the bearer token from an inbound request, verifies it, and
//! enforces role membership. All admin reads and mutations go through
//! [`require_role`].
//!
//! # Security considerations
//! [`authenticate`] collapses every validation failure (malformed syntax,
//! bad signature, expiry) into one outward-facing error so responses do not
//! reveal why a credential was rejected.
use crate::auth::token::{validate_token, Claims};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use thiserror::Error;

pub const ADMIN_ROLE: &str = "ADMIN";
pub const USER_ROLE: &str = "USER";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,
    #[error("invalid credential")]
    Unauthenticated,
    #[error("required role missing: {0}")]
    Forbidden(String),
}

/// Pull the raw token out of the `Authorization` header.
///
/// # Errors
/// - `AuthError::MissingCredential` when the header is absent, unreadable,
///   or does not use the `Bearer ` scheme.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingCredential)
}

/// Extract and verify the bearer credential.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Claims, AuthError> {
    let token = extract_bearer(headers)?;
    validate_token(secret, token).map_err(|_| AuthError::Unauthenticated)
}

/// Authenticate, then require membership in `role`.
///
/// # Errors
/// - `AuthError::Forbidden` when the verified claims lack the role.
pub fn require_role(headers: &HeaderMap, secret: &str, role: &str) -> Result<Claims, AuthError> {
    let claims = authenticate(headers, secret)?;
    if !claims.has_role(role) {
        return Err(AuthError::Forbidden(role.to_string()));
    }
    Ok(claims)
}
