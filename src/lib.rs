pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod storage;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use config::{ConfigError, ServerConfig, UserStore};
use storage::seed::{seed_demo_data, SeedOptions};
use storage::{DatabaseStorage, MemStorage, Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the configured backend, seeding its in-memory tables if asked.
pub fn open_storage(config: &ServerConfig) -> Result<Arc<dyn Storage>, StartupError> {
    let storage: Arc<dyn Storage> = match &config.user_store {
        UserStore::Memory => {
            let store = MemStorage::new();
            if config.seed {
                seed(&store)?;
            }
            Arc::new(store)
        }
        UserStore::Sqlite(path) => {
            let store = DatabaseStorage::open(path)?;
            if config.seed {
                seed(store.memory())?;
            }
            Arc::new(store)
        }
    };
    Ok(storage)
}

fn seed(store: &MemStorage) -> Result<(), StorageError> {
    let mut rng = StdRng::from_entropy();
    seed_demo_data(store, &mut rng, SeedOptions::default())?;
    Ok(())
}

/// Entry point for the `labdesk` binary: serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        user_store = ?config.user_store,
        seed = config.seed,
        "Configuration loaded"
    );

    let storage = open_storage(&config)?;
    let server = api::start_api_server(storage, config.addr).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.server_addr,
        "Listening"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.stop().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_is_seeded_on_request() {
        let config = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            user_store: UserStore::Memory,
            seed: true,
        };
        let storage = open_storage(&config).unwrap();
        assert!(!storage.get_all_lab_services().unwrap().is_empty());
        assert!(!storage.get_all_lab_orders().unwrap().is_empty());
    }

    #[test]
    fn unseeded_sqlite_backend_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            user_store: UserStore::Sqlite(dir.path().join("nested").join("users.db")),
            seed: false,
        };
        let storage = open_storage(&config).unwrap();
        assert!(storage.get_all_patients().unwrap().is_empty());
        assert!(dir.path().join("nested").join("users.db").exists());
    }
}
