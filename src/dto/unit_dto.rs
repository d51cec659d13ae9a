use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::unit::{CoordinateInput, Unit};

// Request para registrar una ambulancia. Todos los campos son opcionales a
// nivel de serde para que la ausencia se reporte como error de validación
// por campo y no como un rechazo del JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUnitRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 32))]
    pub contact_number: Option<String>,

    #[validate(length(max = 32))]
    pub vehicle_number: Option<String>,

    pub vehicle_type: Option<String>,

    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,

    #[validate(length(max = 200))]
    pub driver_name: Option<String>,

    #[validate(length(max = 32))]
    pub driver_contact: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,
}

// Response de listado de ambulancias
#[derive(Debug, Serialize, Deserialize)]
pub struct UnitListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Unit>,
}

impl UnitListResponse {
    pub fn new(data: Vec<Unit>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
