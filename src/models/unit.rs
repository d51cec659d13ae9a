//! Modelo de Unit (ambulancia)
//!
//! Este módulo contiene la unidad de emergencia registrada, su tipo de
//! vehículo y las coordenadas geográficas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de vehículo - conjunto cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    #[default]
    Basic,
    Advanced,
    PatientTransport,
    Neonatal,
    Air,
}

impl VehicleType {
    pub const ALLOWED: [&'static str; 5] = ["basic", "advanced", "patient-transport", "neonatal", "air"];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Basic => "basic",
            VehicleType::Advanced => "advanced",
            VehicleType::PatientTransport => "patient-transport",
            VehicleType::Neonatal => "neonatal",
            VehicleType::Air => "air",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(VehicleType::Basic),
            "advanced" => Ok(VehicleType::Advanced),
            "patient-transport" => Ok(VehicleType::PatientTransport),
            "neonatal" => Ok(VehicleType::Neonatal),
            "air" => Ok(VehicleType::Air),
            other => Err(format!("unknown vehicle type '{}'", other)),
        }
    }
}

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Coordenada tal como llega en el request: número JSON o texto.
///
/// Cualquier otro valor JSON cae en `Other` para que la validación lo
/// reporte por campo en lugar de fallar la deserialización.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Unidad registrada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    pub contact_number: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub latitude: f64,
    pub longitude: f64,
    pub driver_name: String,
    pub driver_contact: String,
    pub address: String,
    pub city: String,
    pub registered_at: DateTime<Utc>,
}

impl Unit {
    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Unidad validada, lista para insertar. El almacenamiento asigna `id`
/// y `registered_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUnit {
    pub name: String,
    pub contact_number: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub location: Coordinate,
    pub driver_name: String,
    pub driver_contact: String,
    pub address: String,
    pub city: String,
}

impl NewUnit {
    pub fn into_unit(self, id: Uuid, registered_at: DateTime<Utc>) -> Unit {
        Unit {
            id,
            name: self.name,
            contact_number: self.contact_number,
            vehicle_number: self.vehicle_number,
            vehicle_type: self.vehicle_type,
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            driver_name: self.driver_name,
            driver_contact: self.driver_contact,
            address: self.address,
            city: self.city,
            registered_at,
        }
    }
}
