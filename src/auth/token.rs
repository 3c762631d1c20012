//! Token issuance and verification.
//!
//! # Purpose
//! Define the claims structure and helpers for signing and verifying the
//! HS256 access tokens used by the registry API.
//!
//! # Key invariants
//! - The signing secret is shared: issuer and verifier are the same process,
//!   so a symmetric scheme is sufficient.
//! - `exp` is always `iat` plus the configured expiry; verification rejects
//!   expired tokens itself rather than trusting the signature alone.
//! - There is no revocation: tokens stay valid until natural expiry.
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Claims carried by registry-issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|held| held == role)
    }
}

/// Errors produced by token minting or verification.
///
/// Signature failures, malformed structure, and expiry all surface as the
/// same variant; callers that must not leak the cause get that for free.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Mint a signed token for a subject and role set.
///
/// Pure computation: no storage, no side effects beyond reading the clock.
pub fn issue_token(
    secret: &str,
    subject: &str,
    roles: &[String],
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        roles: roles.to_vec(),
        iat: now,
        exp: now + ttl.as_secs() as i64,
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// Verify signature, structure, and freshness of a token.
///
/// # Errors
/// - `TokenError::Jwt` when the signature does not verify, the payload is
///   malformed, or the token is expired.
pub fn validate_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // Zero leeway: a token is valid strictly within [iat, exp).
    validation.leeway = 0;
    let data = jsonwebtoken::decode::<Claims>(token, &key, &validation)?;
    Ok(data.claims)
}
