//! Route definitions for the phonebook server
//!
//! - POST / and POST /graphql - GraphQL endpoint
//! - GET / and GET /graphql - GraphiQL landing page
//! - GET /health - Health check endpoint

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use phonebook_core::ContactStore;
use std::time::Instant;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use super::{
    csrf_prevention_middleware, request_logging_middleware, ApiResponse, ErrorInfo,
    HealthResponse, HealthStatus, MiddlewareState,
};
use crate::config::ServerConfig;
use crate::graphql::{build_schema, PhonebookSchema};

const GRAPHQL_PATH: &str = "/graphql";

/// Handler state shared across all routes
#[derive(Clone)]
pub struct HandlerState {
    pub schema: PhonebookSchema,
    pub store: ContactStore,
    /// Whether GET serves the GraphiQL landing page
    pub graphiql: bool,
    pub max_body_size: usize,
    /// Start time for uptime calculation
    pub start_time: Instant,
}

impl HandlerState {
    pub fn new(store: ContactStore, config: &ServerConfig) -> Self {
        Self {
            schema: build_schema(store.clone(), &config.schema),
            store,
            graphiql: config.graphiql,
            max_body_size: config.max_body_size,
            start_time: Instant::now(),
        }
    }
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_info = ErrorInfo::new(self.error_code(), self.message());
        let response = ApiResponse::error(error_info, uuid::Uuid::new_v4().to_string());

        (status, Json(response)).into_response()
    }
}

/// Create the router with all routes
pub fn create_router(handler_state: HandlerState, middleware_state: MiddlewareState) -> Router {
    let max_body_size = handler_state.max_body_size;

    Router::new()
        .route("/", get(landing_page).post(graphql_handler))
        .route(GRAPHQL_PATH, get(landing_page).post(graphql_handler))
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            csrf_prevention_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            request_logging_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state((handler_state, middleware_state))
}

/// POST /graphql - Execute a GraphQL operation
pub async fn graphql_handler(
    State((state, _)): State<(HandlerState, MiddlewareState)>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner();
    tracing::debug!(operation = ?request.operation_name, "executing GraphQL operation");
    state.schema.execute(request).await.into()
}

/// GET /graphql - GraphiQL landing page
pub async fn landing_page(
    State((state, _)): State<(HandlerState, MiddlewareState)>,
) -> Result<Html<String>, ApiError> {
    if !state.graphiql {
        return Err(ApiError::NotFound(
            "GraphiQL landing page is disabled".to_string(),
        ));
    }

    Ok(Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()))
}

/// GET /health - Health check endpoint
pub async fn health_check(
    State((state, middleware_state)): State<(HandlerState, MiddlewareState)>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        contacts: state.store.count(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        requests_served: middleware_state.requests_served(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
