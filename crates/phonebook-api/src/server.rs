//! Server startup

use anyhow::Context;
use phonebook_core::{load_seed_file, ContactStore};

use crate::config::ServerConfig;
use crate::handler::{create_router, HandlerState, MiddlewareState};

/// Build the initial contact store from the configured seed source
pub fn initial_store(config: &ServerConfig) -> anyhow::Result<ContactStore> {
    match &config.seed_file {
        Some(path) => load_seed_file(path)
            .with_context(|| format!("failed to load seed file {}", path.display())),
        None if config.sample_data => Ok(ContactStore::sample()),
        None => Ok(ContactStore::new()),
    }
}

/// Build the full application router for a configuration
pub fn build_app(config: &ServerConfig, store: ContactStore) -> axum::Router {
    let handler_state = HandlerState::new(store, config);
    let middleware_state = MiddlewareState::from_config(config);
    create_router(handler_state, middleware_state)
}

/// Bind, serve until Ctrl-C, then shut down gracefully
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = initial_store(&config)?;
    let addr = config.bind_address();

    tracing::info!(
        contacts = store.count(),
        graphiql = config.graphiql,
        csrf_prevention = config.csrf_prevention,
        "starting phonebook server"
    );

    let router = build_app(&config, store);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server ready at http://{}/", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "failed to install Ctrl-C handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_initial_store_sources() {
        let config = ServerConfig::default();
        assert_eq!(initial_store(&config).unwrap().count(), 3);

        let config = ServerConfig {
            sample_data: false,
            ..ServerConfig::default()
        };
        assert_eq!(initial_store(&config).unwrap().count(), 0);
    }

    #[test]
    fn test_initial_store_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Ana", "street": "X", "city": "Y"}}]"#).unwrap();

        let config = ServerConfig {
            seed_file: Some(file.path().to_path_buf()),
            ..ServerConfig::default()
        };
        let store = initial_store(&config).unwrap();
        assert_eq!(store.count(), 1);
        assert!(store.find_by_name("Ana").is_some());
    }

    #[test]
    fn test_initial_store_bad_seed_file() {
        let config = ServerConfig {
            seed_file: Some("/nonexistent/contacts.json".into()),
            ..ServerConfig::default()
        };
        assert!(initial_store(&config).is_err());
    }
}
