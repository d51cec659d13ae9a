use serde::{Deserialize, Serialize};

use crate::models::unit::CoordinateInput;
use crate::services::contact_formatter::AnnotatedCandidate;

// Request de emergencia: ubicación del paciente y teléfono opcional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchRequest {
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
    pub caller_phone: Option<String>,
}

// Response de emergencia
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub degraded: bool,
    pub candidates: Vec<AnnotatedCandidate>,
}
