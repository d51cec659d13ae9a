//! Registro de ambulancias
//!
//! Valida y normaliza los datos de registro antes de delegar la persistencia
//! al [`UnitStore`]. La unicidad de la matrícula la garantiza el almacenamiento.

use std::sync::Arc;
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::dto::unit_dto::RegisterUnitRequest;
use crate::models::unit::{NewUnit, Unit};
use crate::repositories::unit_repository::UnitStore;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_location, validate_not_empty, validate_vehicle_type};

#[derive(Clone)]
pub struct UnitRegistry {
    store: Arc<dyn UnitStore>,
}

/// Campo de texto obligatorio, recortado; registra el error si falta
fn required(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if let Err(e) = validate_not_empty(value) {
        errors.add(field, e);
    }
    value.to_string()
}

fn optional(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl UnitRegistry {
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store }
    }

    /// Validar los campos de registro y producir una unidad insertable
    pub fn prepare(request: RegisterUnitRequest) -> Result<NewUnit, ValidationErrors> {
        let mut errors = match request.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };

        let name = required(&mut errors, "name", request.name.as_deref());
        let contact_number = required(&mut errors, "contact_number", request.contact_number.as_deref());
        let vehicle_number = required(&mut errors, "vehicle_number", request.vehicle_number.as_deref());
        let driver_name = required(&mut errors, "driver_name", request.driver_name.as_deref());
        let driver_contact = required(&mut errors, "driver_contact", request.driver_contact.as_deref());

        let vehicle_type = validate_vehicle_type(request.vehicle_type.as_deref())
            .map_err(|e| errors.add("vehicle_type", e))
            .ok();

        let location = match parse_location(request.latitude.as_ref(), request.longitude.as_ref()) {
            Ok(location) => Some(location),
            Err(location_errors) => {
                for (field, field_errors) in location_errors.field_errors() {
                    for e in field_errors {
                        errors.add(field, e.clone());
                    }
                }
                None
            }
        };

        match (vehicle_type, location) {
            (Some(vehicle_type), Some(location)) if errors.is_empty() => Ok(NewUnit {
                name,
                contact_number,
                vehicle_number,
                vehicle_type,
                location,
                driver_name,
                driver_contact,
                address: optional(request.address),
                city: optional(request.city),
            }),
            _ => Err(errors),
        }
    }

    /// Registrar una nueva unidad
    pub async fn register(&self, request: RegisterUnitRequest) -> Result<Unit, AppError> {
        let new_unit = Self::prepare(request)?;
        let unit = self.store.insert(new_unit).await?;

        info!(
            "🚑 Ambulancia registrada: {} ({}, {}) en ({}, {})",
            unit.vehicle_number, unit.name, unit.vehicle_type, unit.latitude, unit.longitude
        );
        Ok(unit)
    }

    /// Todas las unidades registradas
    pub async fn list_all(&self) -> Result<Vec<Unit>, AppError> {
        self.store.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::unit::{Coordinate, CoordinateInput, VehicleType};
    use crate::repositories::unit_repository::InMemoryUnitRepository;

    fn request() -> RegisterUnitRequest {
        RegisterUnitRequest {
            name: Some(" City Ambulance Service ".into()),
            contact_number: Some("011-23456789".into()),
            vehicle_number: Some("DL-01-AB-1234".into()),
            vehicle_type: None,
            latitude: Some(CoordinateInput::Text("28.6139".into())),
            longitude: Some(CoordinateInput::Number(77.2090)),
            driver_name: Some("Ravi Kumar".into()),
            driver_contact: Some("+91 98100 00001".into()),
            address: None,
            city: Some("New Delhi".into()),
        }
    }

    fn field_errors(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => {
                let mut fields: Vec<&'static str> = errors.field_errors().keys().copied().collect();
                fields.sort();
                fields
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_prepare_applies_defaults() {
        let unit = UnitRegistry::prepare(request()).unwrap();
        assert_eq!(unit.name, "City Ambulance Service");
        assert_eq!(unit.vehicle_type, VehicleType::Basic);
        assert_eq!(unit.location, Coordinate::new(28.6139, 77.2090));
        assert_eq!(unit.address, "");
        assert_eq!(unit.city, "New Delhi");
    }

    #[tokio::test]
    async fn test_register_persists_unit() {
        let registry = UnitRegistry::new(Arc::new(InMemoryUnitRepository::new()));
        let unit = registry.register(request()).await.unwrap();

        assert_eq!(unit.vehicle_number, "DL-01-AB-1234");
        assert_eq!(registry.list_all().await.unwrap(), vec![unit]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported_per_field() {
        let registry = UnitRegistry::new(Arc::new(InMemoryUnitRepository::new()));
        let mut req = request();
        req.name = None;
        req.driver_contact = Some("   ".into());
        req.latitude = None;

        let err = registry.register(req).await.unwrap_err();
        assert_eq!(field_errors(err), vec!["driver_contact", "latitude", "name"]);
        assert!(registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_and_non_numeric_coordinates() {
        let registry = UnitRegistry::new(Arc::new(InMemoryUnitRepository::new()));
        let mut req = request();
        req.latitude = Some(CoordinateInput::Number(123.0));
        req.longitude = Some(CoordinateInput::Text("east".into()));

        let err = registry.register(req).await.unwrap_err();
        assert_eq!(field_errors(err), vec!["latitude", "longitude"]);
    }

    #[tokio::test]
    async fn test_unknown_vehicle_type_is_rejected() {
        let registry = UnitRegistry::new(Arc::new(InMemoryUnitRepository::new()));
        let mut req = request();
        req.vehicle_type = Some("hovercraft".into());

        let err = registry.register(req).await.unwrap_err();
        assert_eq!(field_errors(err), vec!["vehicle_type"]);
    }

    #[tokio::test]
    async fn test_duplicate_vehicle_number_leaves_registry_unchanged() {
        let registry = UnitRegistry::new(Arc::new(InMemoryUnitRepository::new()));
        let first = registry.register(request()).await.unwrap();

        let mut again = request();
        again.name = Some("Another Fleet".into());
        let err = registry.register(again).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateUnit(ref v) if v == "DL-01-AB-1234"));
        assert_eq!(registry.list_all().await.unwrap(), vec![first]);
    }
}
