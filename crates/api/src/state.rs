use std::sync::Arc;

use tasktracker_core::services::{ProjectService, TaskService};
use tasktracker_core::store::{ProjectStore, StoreHealth, TaskStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (services hold their stores behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub projects: ProjectService,
    pub tasks: TaskService,
    /// Reachability check for the configured store.
    pub health: Arc<dyn StoreHealth>,
    /// Name of the storage backend, reported by `/health`.
    pub backend: &'static str,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire both services to a single store.
    pub fn new<S>(store: S, backend: &'static str, config: ServerConfig) -> Self
    where
        S: ProjectStore + TaskStore + StoreHealth + 'static,
    {
        let store = Arc::new(store);
        Self {
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone(), store.clone()),
            health: store,
            backend,
            config: Arc::new(config),
        }
    }
}
