//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::{FleetRepository, MemoryFleetRepository};
use crate::services::CompliancePolicy;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FleetRepository>,
    pub config: Arc<EnvironmentConfig>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FleetRepository>, config: EnvironmentConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }

    /// Estado con almacenamiento en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(Arc::new(MemoryFleetRepository::new()), config)
    }

    pub fn compliance_policy(&self) -> CompliancePolicy {
        self.config.compliance_policy()
    }
}
