//! API error types and helpers.
//!
//! # Purpose
//! Centralizes HTTP error response construction so every endpoint returns
//! the same `{code, message, request_id}` shape, and maps the auth and
//! store error enums onto it.
//!
//! # Key invariants
//! - `status` always matches the semantics of `body.code`.
//! - Missing and invalid credentials share one 401 response; the cause is
//!   never distinguishable from the outside.
use crate::api::types::ErrorResponse;
use crate::auth::guard::AuthError;
use crate::store::FlagError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Structured API error: an HTTP status coupled with a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            request_id: None,
        },
    }
}

/// 400 for malformed or out-of-range input.
pub fn api_validation_error(message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// 401 for an absent or invalid bearer credential.
pub fn api_unauthorized(message: &str) -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// 403 for an authenticated caller lacking the required role.
pub fn api_forbidden(message: &str) -> ApiError {
    api_error(StatusCode::FORBIDDEN, "forbidden", message)
}

/// 404 for operations targeting an unknown catalog entry.
pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not_found", message)
}

/// 500 for failures that should not reach clients in detail.
pub fn api_internal(message: &str) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // One outward-facing 401 for both causes.
            AuthError::MissingCredential => api_unauthorized("missing bearer credential"),
            AuthError::Unauthenticated => api_unauthorized("invalid credential"),
            AuthError::Forbidden(role) => api_forbidden(&format!("{role} role required")),
        }
    }
}

impl From<FlagError> for ApiError {
    fn from(err: FlagError) -> Self {
        match err {
            FlagError::InvalidPercentage(_) => {
                api_validation_error("rolloutPercentage must be between 0 and 100")
            }
            FlagError::UnknownRemote(_) => api_not_found("unknown remoteId"),
        }
    }
}
