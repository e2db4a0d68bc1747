//! HTTP handler layer for the phonebook server
//!
//! - `routes`: GraphQL endpoint, GraphiQL landing page and health check
//! - `middleware`: request logging and CSRF prevention
//!
//! GraphQL responses use the standard `{data, errors}` body produced by
//! async-graphql. Everything else answers with the JSON envelope below.

pub mod middleware;
pub mod routes;

pub use middleware::{
    csrf_prevention_middleware, is_preflighted, request_logging_middleware, MiddlewareState,
};
pub use routes::{create_router, graphql_handler, health_check, landing_page, ApiError, HandlerState};

use serde::{Deserialize, Serialize};

/// Error envelope for non-GraphQL endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Always false; kept so clients can branch on one field
    pub success: bool,
    pub error: ErrorInfo,
    pub metadata: ResponseMetadata,
}

impl ApiResponse {
    pub fn error(error: ErrorInfo, request_id: String) -> Self {
        Self {
            success: false,
            error,
            metadata: ResponseMetadata::new(request_id),
        }
    }
}

/// Error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Response metadata for tracing and debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub request_id: String,
    /// Timestamp of response generation (ISO 8601)
    pub timestamp: String,
    pub version: String,
}

impl ResponseMetadata {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Number of stored contacts
    pub contacts: usize,
    pub uptime_seconds: u64,
    pub requests_served: u64,
    pub timestamp: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}
