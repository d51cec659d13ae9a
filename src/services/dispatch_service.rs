//! Orquestación del despacho de emergencias
//!
//! Une el registro, el matching y el formateo de contacto detrás de las
//! operaciones públicas `register_unit`, `list_units` y `dispatch_emergency`.

use serde::Serialize;
use tracing::{info, warn};

use crate::dto::unit_dto::RegisterUnitRequest;
use crate::models::unit::{Coordinate, Unit};
use crate::services::contact_formatter::{annotate, AnnotatedCandidate};
use crate::services::dispatch_matcher::{match_units, DispatchOptions};
use crate::services::unit_registry::UnitRegistry;
use crate::utils::errors::AppError;

/// Resultado de un despacho
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub candidates: Vec<AnnotatedCandidate>,
    pub degraded: bool,
    pub count: usize,
    pub radius_km: f64,
}

#[derive(Clone)]
pub struct DispatchService {
    registry: UnitRegistry,
    options: DispatchOptions,
}

impl DispatchService {
    pub fn new(registry: UnitRegistry, options: DispatchOptions) -> Self {
        Self { registry, options }
    }

    /// Registrar una ambulancia; los errores de validación y duplicado se
    /// propagan tal cual
    pub async fn register_unit(&self, request: RegisterUnitRequest) -> Result<Unit, AppError> {
        self.registry.register(request).await
    }

    pub async fn list_units(&self) -> Result<Vec<Unit>, AppError> {
        self.registry.list_all().await
    }

    /// Buscar las ambulancias más cercanas a una emergencia
    pub async fn dispatch_emergency(
        &self,
        location: Coordinate,
        caller_phone: Option<&str>,
    ) -> Result<DispatchOutcome, AppError> {
        let units = self.registry.list_all().await?;
        if units.is_empty() {
            return Err(AppError::NoUnitsRegistered);
        }

        let outcome = match_units(location, &units, &self.options);
        let candidates: Vec<AnnotatedCandidate> = outcome
            .candidates
            .into_iter()
            .map(|candidate| annotate(candidate, caller_phone))
            .collect();

        if outcome.degraded {
            warn!(
                "⚠️ Sin ambulancias a menos de {} km de ({}, {}); devolviendo {} de {} unidades",
                self.options.radius_km,
                location.latitude,
                location.longitude,
                candidates.len(),
                units.len()
            );
        } else {
            info!(
                "🚨 Emergencia en ({}, {}): {} ambulancias a menos de {} km",
                location.latitude,
                location.longitude,
                candidates.len(),
                self.options.radius_km
            );
        }

        Ok(DispatchOutcome {
            count: candidates.len(),
            candidates,
            degraded: outcome.degraded,
            radius_km: self.options.radius_km,
        })
    }
}
