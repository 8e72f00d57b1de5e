//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, DicomService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// DICOM ingest service
    pub dicom_service: Arc<dyn DicomService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Loaded settings
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config,
    /// wiring every service through one [`Services`] container.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone());
        Self::from_container(&container, database, config)
    }

    /// Create application state around an existing service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            dicom_service: container.dicom(),
            database,
            config: Arc::new(config),
        }
    }
}
