//! Middleware for request processing
//!
//! - Request logging with a per-request id
//! - CSRF prevention for the GraphQL endpoint
//!
//! A POST is only let through when a browser could not have sent it
//! cross-site without a CORS preflight: it must either carry a
//! `content-type` that is not one of the "simple" form types, or a
//! non-empty `x-apollo-operation-name` / `apollo-require-preflight` header.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::ApiError;
use crate::config::ServerConfig;

/// Content types a browser may send cross-site without a preflight
const SIMPLE_CONTENT_TYPES: [&str; 3] = [
    "application/x-www-form-urlencoded",
    "multipart/form-data",
    "text/plain",
];

/// Headers whose presence forces a preflight
const PREFLIGHT_HEADERS: [&str; 2] = ["x-apollo-operation-name", "apollo-require-preflight"];

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware state shared across requests
#[derive(Debug, Clone)]
pub struct MiddlewareState {
    pub csrf_prevention: bool,
    request_counter: Arc<AtomicU64>,
}

impl MiddlewareState {
    pub fn new(csrf_prevention: bool) -> Self {
        Self {
            csrf_prevention,
            request_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.csrf_prevention)
    }

    /// Number of requests seen so far
    pub fn requests_served(&self) -> u64 {
        self.request_counter.load(Ordering::Relaxed)
    }

    fn next_request(&self) -> u64 {
        self.request_counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Whether a request could only have been sent after a CORS preflight
pub fn is_preflighted(headers: &HeaderMap) -> bool {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
        .filter(|essence| !essence.is_empty());

    if let Some(essence) = content_type {
        if !SIMPLE_CONTENT_TYPES.contains(&essence.as_str()) {
            return true;
        }
    }

    PREFLIGHT_HEADERS.iter().any(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.is_empty())
    })
}

/// Reject POST requests that are not preflighted
pub async fn csrf_prevention_middleware(
    State(state): State<MiddlewareState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.csrf_prevention || request.method() != Method::POST {
        return next.run(request).await;
    }

    if is_preflighted(request.headers()) {
        return next.run(request).await;
    }

    tracing::warn!(uri = %request.uri(), "blocked request as potential CSRF");
    ApiError::BadRequest(
        "This operation has been blocked as a potential Cross-Site Request Forgery (CSRF). \
         Please either specify a 'content-type' header (with a type that is not one of \
         application/x-www-form-urlencoded, multipart/form-data, text/plain) or provide a \
         non-empty value for one of the following headers: x-apollo-operation-name, \
         apollo-require-preflight"
            .to_string(),
    )
    .into_response()
}

/// Log every request with an id, its status and duration
pub async fn request_logging_middleware(
    State(state): State<MiddlewareState>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let sequence = state.next_request();
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!(
        request_id = %request_id,
        sequence,
        method = %method,
        uri = %uri,
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start_time.elapsed().as_millis(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_json_content_type_is_preflighted() {
        assert!(is_preflighted(&headers(&[("content-type", "application/json")])));
        assert!(is_preflighted(&headers(&[(
            "content-type",
            "application/json; charset=utf-8"
        )])));
    }

    #[test]
    fn test_simple_content_types_are_not_preflighted() {
        assert!(!is_preflighted(&headers(&[("content-type", "text/plain")])));
        assert!(!is_preflighted(&headers(&[(
            "content-type",
            "Multipart/Form-Data; boundary=x"
        )])));
        assert!(!is_preflighted(&HeaderMap::new()));
    }

    #[test]
    fn test_preflight_headers() {
        assert!(is_preflighted(&headers(&[
            ("content-type", "text/plain"),
            ("apollo-require-preflight", "true"),
        ])));
        assert!(is_preflighted(&headers(&[("x-apollo-operation-name", "Q")])));
        assert!(!is_preflighted(&headers(&[("apollo-require-preflight", "")])));
    }

    #[test]
    fn test_request_counter() {
        let state = MiddlewareState::new(true);
        assert_eq!(state.requests_served(), 0);
        assert_eq!(state.next_request(), 1);
        assert_eq!(state.clone().next_request(), 2);
        assert_eq!(state.requests_served(), 2);
    }
}
