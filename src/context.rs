//! Per-request correlation context.
//!
//! # Purpose
//! Derives correlation, request, and session identifiers from inbound
//! headers (generating fallbacks where absent), carries them through the
//! request as an extension, echoes the correlation id on the response, and
//! emits the request completion log line.
//!
//! # Notes
//! The context lives in the request's extensions rather than any ambient
//! thread-local state, so concurrently handled requests cannot observe
//! each other's identifiers and nothing needs clearing on completion.
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const SESSION_ID_HEADER: &str = "x-session-id";
pub const USER_ID_HEADER: &str = "x-user-id";

const UNKNOWN_SESSION: &str = "session-unknown";

/// Identifiers attributed to one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub correlation_id: String,
    pub request_id: String,
    pub session_id: String,
}

impl RequestContext {
    /// Header values win when present and non-blank; correlation and
    /// request ids fall back to generated values, the session id to a
    /// fixed literal since the server cannot invent a meaningful one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            correlation_id: non_blank_header(headers, CORRELATION_ID_HEADER)
                .unwrap_or_else(|| format!("corr-{}", Uuid::new_v4())),
            request_id: non_blank_header(headers, REQUEST_ID_HEADER)
                .unwrap_or_else(|| format!("req-{}", Uuid::new_v4())),
            session_id: non_blank_header(headers, SESSION_ID_HEADER)
                .unwrap_or_else(|| UNKNOWN_SESSION.to_string()),
        }
    }
}

/// A header value treated as present only when readable and non-blank.
pub fn non_blank_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Middleware wrapping every route: attaches the context, runs the
/// handler, echoes the correlation id, and logs the completed request.
pub async fn propagate_context(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_headers(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(ctx.clone());

    let started = Instant::now();
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.correlation_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
    }
    tracing::info!(
        event = "http_request",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        correlation_id = %ctx.correlation_id,
        request_id = %ctx.request_id,
        session_id = %ctx.session_id,
    );
    response
}
