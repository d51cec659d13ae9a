use futures::future::join_all;
use std::sync::Arc;

use emergency_dispatch::dto::unit_dto::RegisterUnitRequest;
use emergency_dispatch::models::unit::{Coordinate, CoordinateInput};
use emergency_dispatch::repositories::unit_repository::{InMemoryUnitRepository, UnitStore};
use emergency_dispatch::services::dispatch_matcher::DispatchOptions;
use emergency_dispatch::services::unit_registry::UnitRegistry;
use emergency_dispatch::services::DispatchService;
use emergency_dispatch::utils::errors::AppError;

fn create_service() -> (DispatchService, Arc<InMemoryUnitRepository>) {
    let store = Arc::new(InMemoryUnitRepository::new());
    let service = DispatchService::new(UnitRegistry::new(store.clone()), DispatchOptions::default());
    (service, store)
}

fn registration(vehicle_number: &str, lat: f64, lng: f64) -> RegisterUnitRequest {
    RegisterUnitRequest {
        name: Some("Apollo Emergency".into()),
        contact_number: Some("1066".into()),
        vehicle_number: Some(vehicle_number.into()),
        vehicle_type: Some("advanced".into()),
        latitude: Some(CoordinateInput::Number(lat)),
        longitude: Some(CoordinateInput::Number(lng)),
        driver_name: Some("Meera".into()),
        driver_contact: Some("98100 00003".into()),
        address: Some("Sarita Vihar".into()),
        city: Some("New Delhi".into()),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_registration_has_one_winner() {
    let (service, store) = create_service();

    let attempts = (0..8).map(|_| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .register_unit(registration("DL-1CA-0001", 28.6139, 77.2090))
                .await
        })
    });

    let results: Vec<Result<_, AppError>> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("registration task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::DuplicateUnit(_))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_dispatch_properties_over_a_grid() {
    let (service, _) = create_service();

    // Rejilla de 7x7 unidades alrededor de Nueva Delhi, ~1.1 km entre filas
    for i in 0..7 {
        for j in 0..7 {
            let lat = 28.58 + i as f64 * 0.01;
            let lng = 77.17 + j as f64 * 0.01;
            service
                .register_unit(registration(&format!("DL-{}-{}", i, j), lat, lng))
                .await
                .unwrap();
        }
    }

    let requests = [
        Coordinate::new(28.6139, 77.2090),
        Coordinate::new(28.58, 77.17),
        Coordinate::new(28.80, 77.40),
        Coordinate::new(19.0760, 72.8777),
    ];

    for location in requests {
        let outcome = service.dispatch_emergency(location, None).await.unwrap();

        assert!(!outcome.candidates.is_empty());
        assert!(outcome.count <= 10);
        assert_eq!(outcome.count, outcome.candidates.len());
        assert!(outcome
            .candidates
            .windows(2)
            .all(|w| w[0].distance_km <= w[1].distance_km));

        let any_within_radius = outcome.candidates[0].distance_km <= outcome.radius_km;
        assert_eq!(outcome.degraded, !any_within_radius, "at {:?}", location);
    }
}

#[tokio::test]
async fn test_list_units_returns_registered() {
    let (service, _) = create_service();
    assert!(service.list_units().await.unwrap().is_empty());

    service.register_unit(registration("DL-A", 28.61, 77.20)).await.unwrap();
    service.register_unit(registration("DL-B", 28.62, 77.21)).await.unwrap();

    let mut plates: Vec<String> = service
        .list_units()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.vehicle_number)
        .collect();
    plates.sort();
    assert_eq!(plates, vec!["DL-A", "DL-B"]);
}
