//! Selección de ambulancias cercanas
//!
//! Dada la ubicación de una emergencia y el snapshot de unidades registradas,
//! calcula la distancia a cada unidad, filtra por radio, ordena y recorta.
//! Si ninguna unidad cae dentro del radio se devuelve el listado completo
//! ordenado por distancia y marcado como `degraded`.

use crate::models::unit::{Coordinate, Unit};
use crate::services::geo_math::distance_km;

/// Radio por defecto en km
pub const DEFAULT_RADIUS_KM: f64 = 5.0;
/// Máximo de candidatos por defecto
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Política de búsqueda
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOptions {
    pub radius_km: f64,
    pub max_results: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Unidad con su distancia al punto de la emergencia
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedUnit<'a> {
    pub unit: &'a Unit,
    pub distance_km: f64,
}

/// Resultado del matching
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<'a> {
    pub candidates: Vec<MatchedUnit<'a>>,
    /// `true` cuando ninguna unidad estaba dentro del radio y se devolvió
    /// el mejor esfuerzo sobre todas las unidades
    pub degraded: bool,
}

/// Ordenar por distancia ascendente; empates por `id` ascendente
fn rank(candidates: &mut [MatchedUnit<'_>]) {
    candidates.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.unit.id.cmp(&b.unit.id))
    });
}

/// Seleccionar las unidades más cercanas a `request_location`.
///
/// Nunca falla: un conjunto vacío produce un resultado vacío no degradado.
pub fn match_units<'a>(
    request_location: Coordinate,
    units: &'a [Unit],
    options: &DispatchOptions,
) -> MatchOutcome<'a> {
    let mut all: Vec<MatchedUnit<'a>> = units
        .iter()
        .map(|unit| MatchedUnit {
            unit,
            distance_km: distance_km(request_location, unit.location()),
        })
        .collect();

    let mut nearby: Vec<MatchedUnit<'a>> = all
        .iter()
        .copied()
        .filter(|c| c.distance_km <= options.radius_km)
        .collect();

    let degraded = nearby.is_empty() && !all.is_empty();

    let mut candidates = if degraded {
        rank(&mut all);
        all
    } else {
        rank(&mut nearby);
        nearby
    };
    candidates.truncate(options.max_results);

    MatchOutcome { candidates, degraded }
}
