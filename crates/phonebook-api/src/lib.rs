//! Phonebook API
//!
//! GraphQL server over the in-memory contact store of `phonebook-core`.
//!
//! ## Architecture
//!
//! 1. **GraphQL** (`graphql/`): schema, query and mutation resolvers built on
//!    async-graphql.
//!
//! 2. **Handler** (`handler/`): axum routes for the GraphQL endpoint, the
//!    GraphiQL landing page and the health check, plus request logging and
//!    CSRF prevention middleware.
//!
//! 3. **Config** (`config`): layered server configuration.
//!
//! 4. **Server** (`server`): store seeding, binding and graceful shutdown.
//!
//! ## Example
//!
//! ```rust,no_run
//! use phonebook_api::{serve, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(ServerConfig::default()).await
//! }
//! ```

pub mod config;
pub mod graphql;
pub mod handler;
pub mod server;
pub mod telemetry;

pub use config::{ConfigError, LogFormat, SchemaConfig, ServerConfig};
pub use graphql::{build_schema, sdl, PhonebookSchema};
pub use handler::{create_router, ApiError, HandlerState, MiddlewareState};
pub use server::{build_app, initial_store, serve};
pub use telemetry::init_tracing;
