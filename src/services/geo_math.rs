//! Cálculo de distancias geodésicas
//!
//! Distancia de gran círculo con la fórmula de haversine sobre una Tierra
//! esférica.

use crate::models::unit::Coordinate;

/// Radio medio de la Tierra en km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia en km entre dos puntos, redondeada a 2 decimales.
///
/// Simétrica y con `distance_km(a, a) == 0.0`. Las coordenadas llegan ya
/// validadas, por lo que la función es total.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // Errores de redondeo pueden dejar h apenas fuera de [0, 1]
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_km(EARTH_RADIUS_KM * c)
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
