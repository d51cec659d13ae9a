//! Formateo de contacto para los candidatos
//!
//! Deriva un enlace `tel:` a partir del teléfono del conductor y una etiqueta
//! de estado. No realiza ninguna llamada: la telefonía real es un
//! colaborador externo.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::unit::Unit;
use crate::services::dispatch_matcher::MatchedUnit;

lazy_static! {
    static ref NON_DIAL_CHARS: Regex = Regex::new(r"[^0-9+]").expect("valid dial regex");
}

/// Estado de contacto expuesto al llamante
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CallStatus {
    #[serde(rename = "call initiated")]
    CallInitiated,
    #[serde(rename = "call link available")]
    CallLinkAvailable,
}

/// Candidato listo para la respuesta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedCandidate {
    #[serde(flatten)]
    pub unit: Unit,
    pub distance_km: f64,
    pub contact_handle: String,
    pub status: CallStatus,
}

/// Normalizar un teléfono a dígitos con un `+` inicial opcional
pub fn dialable_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = NON_DIAL_CHARS.replace_all(trimmed, "").replace('+', "");

    if digits.is_empty() {
        // Nada marcable; se conserva el texto sin espacios
        return trimmed.split_whitespace().collect();
    }
    if trimmed.starts_with('+') {
        format!("+{}", digits)
    } else {
        digits
    }
}

pub fn contact_handle(driver_contact: &str) -> String {
    format!("tel:{}", dialable_number(driver_contact))
}

pub fn annotate(candidate: MatchedUnit<'_>, caller_phone: Option<&str>) -> AnnotatedCandidate {
    let status = match caller_phone.map(str::trim) {
        Some(phone) if !phone.is_empty() => CallStatus::CallInitiated,
        _ => CallStatus::CallLinkAvailable,
    };

    AnnotatedCandidate {
        unit: candidate.unit.clone(),
        distance_km: candidate.distance_km,
        contact_handle: contact_handle(&candidate.unit.driver_contact),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::unit::{Coordinate, NewUnit, VehicleType};
    use chrono::Utc;
    use uuid::Uuid;

    fn unit(driver_contact: &str) -> Unit {
        NewUnit {
            name: "Red Cross".into(),
            contact_number: "102".into(),
            vehicle_number: "DL-9".into(),
            vehicle_type: VehicleType::Neonatal,
            location: Coordinate::new(28.6, 77.2),
            driver_name: "Imran".into(),
            driver_contact: driver_contact.into(),
            address: String::new(),
            city: String::new(),
        }
        .into_unit(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_dialable_number() {
        assert_eq!(dialable_number("+91 (981) 000-0001"), "+919810000001");
        assert_eq!(dialable_number("981.000.0001"), "9810000001");
        assert_eq!(dialable_number("98+10"), "9810");
        assert_eq!(dialable_number("ask dispatch"), "askdispatch");
    }

    #[test]
    fn test_status_depends_on_caller_phone() {
        let u = unit("+91 98100 00001");
        let matched = MatchedUnit { unit: &u, distance_km: 1.25 };

        let with_phone = annotate(matched, Some("9999999999"));
        assert_eq!(with_phone.status, CallStatus::CallInitiated);
        assert_eq!(with_phone.contact_handle, "tel:+919810000001");
        assert_eq!(with_phone.distance_km, 1.25);

        assert_eq!(annotate(matched, None).status, CallStatus::CallLinkAvailable);
        assert_eq!(annotate(matched, Some("  ")).status, CallStatus::CallLinkAvailable);
    }

    #[test]
    fn test_candidate_serializes_flat() {
        let u = unit("9810000001");
        let annotated = annotate(MatchedUnit { unit: &u, distance_km: 0.0 }, None);
        let value = serde_json::to_value(&annotated).unwrap();

        assert_eq!(value["driverContact"], "9810000001");
        assert_eq!(value["distanceKm"], 0.0);
        assert_eq!(value["contactHandle"], "tel:9810000001");
        assert_eq!(value["status"], "call link available");
    }
}
