//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::Services;

/// Application state shared with every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection wrapper
    pub database: Arc<Database>,
    /// Repositories and services
    pub services: Arc<Services>,
}

impl AppState {
    /// Wire up state from a connected database and configuration
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            config,
        ));

        Self { database, services }
    }
}
