//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable propio: todo lo
//! compartido vive en el almacenamiento de unidades.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::unit_repository::UnitStore;
use crate::services::unit_registry::UnitRegistry;
use crate::services::DispatchService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub dispatch: DispatchService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn UnitStore>) -> Self {
        let dispatch = DispatchService::new(UnitRegistry::new(store), config.dispatch_options());
        Self { config, dispatch }
    }
}
