//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::models::unit::{Coordinate, CoordinateInput, VehicleType};

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("field is required and cannot be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_range(lat, -90.0, 90.0) {
        errors.add("latitude", e);
    }
    if let Err(e) = validate_range(lng, -180.0, 180.0) {
        errors.add("longitude", e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convertir una coordenada recibida (número o texto) a f64.
///
/// Rechaza valores ausentes, texto no numérico y valores no finitos. El rango
/// se valida aparte con [`validate_coordinates`].
pub fn parse_coordinate(value: Option<&CoordinateInput>) -> Result<f64, ValidationError> {
    let parsed = match value {
        None => {
            let mut error = ValidationError::new("required");
            error.message = Some("coordinate is required".into());
            return Err(error);
        }
        Some(CoordinateInput::Number(n)) => Some(*n),
        Some(CoordinateInput::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(CoordinateInput::Other(_)) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => {
            let mut error = ValidationError::new("numeric");
            error.message = Some("coordinate must be a finite number".into());
            match value {
                Some(CoordinateInput::Text(text)) => error.add_param("value".into(), text),
                Some(CoordinateInput::Other(raw)) => error.add_param("value".into(), raw),
                _ => {}
            }
            Err(error)
        }
    }
}

/// Convertir y validar un par latitud/longitud, acumulando errores por campo
pub fn parse_location(
    latitude: Option<&CoordinateInput>,
    longitude: Option<&CoordinateInput>,
) -> Result<Coordinate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let lat = parse_coordinate(latitude).map_err(|e| errors.add("latitude", e)).ok();
    let lng = parse_coordinate(longitude).map_err(|e| errors.add("longitude", e)).ok();

    match (lat, lng) {
        (Some(lat), Some(lng)) if errors.is_empty() => {
            validate_coordinates(lat, lng)?;
            Ok(Coordinate::new(lat, lng))
        }
        (Some(lat), None) => {
            if let Err(e) = validate_range(lat, -90.0, 90.0) {
                errors.add("latitude", e);
            }
            Err(errors)
        }
        (None, Some(lng)) => {
            if let Err(e) = validate_range(lng, -180.0, 180.0) {
                errors.add("longitude", e);
            }
            Err(errors)
        }
        _ => Err(errors),
    }
}

/// Convertir el tipo de vehículo; vacío o ausente equivale a `basic`
pub fn validate_vehicle_type(value: Option<&str>) -> Result<VehicleType, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(VehicleType::default()),
        Some(raw) => raw.parse::<VehicleType>().map_err(|_| {
            let mut error = ValidationError::new("enum");
            error.add_param("value".into(), &raw.to_string());
            error.add_param("allowed_values".into(), &VehicleType::ALLOWED);
            error
        }),
    }
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}
