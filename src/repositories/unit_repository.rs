use crate::models::unit::{NewUnit, Unit};
use crate::utils::errors::{storage_error, AppError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Frontera de persistencia de unidades.
///
/// `insert` debe garantizar la unicidad de `vehicle_number` de forma atómica:
/// dos inserciones concurrentes con la misma matrícula no pueden tener éxito
/// ambas, y la perdedora devuelve `AppError::DuplicateUnit`.
#[async_trait]
pub trait UnitStore: Send + Sync {
    async fn insert(&self, unit: NewUnit) -> Result<Unit, AppError>;

    async fn list_all(&self) -> Result<Vec<Unit>, AppError>;
}

// Fila tal como sale de PostgreSQL
#[derive(Debug, sqlx::FromRow)]
struct UnitRow {
    id: Uuid,
    name: String,
    contact_number: String,
    vehicle_number: String,
    vehicle_type: String,
    latitude: f64,
    longitude: f64,
    driver_name: String,
    driver_contact: String,
    address: String,
    city: String,
    registered_at: chrono::DateTime<Utc>,
}

impl TryFrom<UnitRow> for Unit {
    type Error = AppError;

    fn try_from(row: UnitRow) -> Result<Self, Self::Error> {
        let vehicle_type = row
            .vehicle_type
            .parse()
            .map_err(|e: String| AppError::Internal(format!("Corrupt unit {}: {}", row.id, e)))?;

        Ok(Unit {
            id: row.id,
            name: row.name,
            contact_number: row.contact_number,
            vehicle_number: row.vehicle_number,
            vehicle_type,
            latitude: row.latitude,
            longitude: row.longitude,
            driver_name: row.driver_name,
            driver_contact: row.driver_contact,
            address: row.address,
            city: row.city,
            registered_at: row.registered_at,
        })
    }
}

const UNIT_COLUMNS: &str = "id, name, contact_number, vehicle_number, vehicle_type, latitude, longitude, \
     driver_name, driver_contact, address, city, registered_at";

/// Traducir el error de un INSERT: la violación de unicidad (SQLSTATE 23505)
/// es una matrícula duplicada; cualquier otro fallo es del almacenamiento.
fn map_insert_error(e: sqlx::Error, vehicle_number: &str) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::DuplicateUnit(vehicle_number.to_string())
        }
        other => storage_error("inserting unit", other),
    }
}

pub struct PgUnitRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUnitRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn with_deadline<T, F>(&self, operation: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(storage_error(
                operation,
                format!("deadline of {:?} exceeded", self.timeout),
            )),
        }
    }
}

#[async_trait]
impl UnitStore for PgUnitRepository {
    async fn insert(&self, unit: NewUnit) -> Result<Unit, AppError> {
        let id = Uuid::new_v4();
        let vehicle_number = unit.vehicle_number.clone();

        let query = format!(
            r#"
            INSERT INTO ambulance_units (id, name, contact_number, vehicle_number, vehicle_type, latitude, longitude, driver_name, driver_contact, address, city, registered_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            UNIT_COLUMNS
        );

        // La restricción UNIQUE de vehicle_number resuelve la carrera entre
        // registros concurrentes; no hay verificación previa.
        let row = self
            .with_deadline("inserting unit", async {
                sqlx::query_as::<_, UnitRow>(&query)
                    .bind(id)
                    .bind(unit.name)
                    .bind(unit.contact_number)
                    .bind(unit.vehicle_number)
                    .bind(unit.vehicle_type.as_str())
                    .bind(unit.location.latitude)
                    .bind(unit.location.longitude)
                    .bind(unit.driver_name)
                    .bind(unit.driver_contact)
                    .bind(unit.address)
                    .bind(unit.city)
                    .bind(Utc::now())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| map_insert_error(e, &vehicle_number))
            })
            .await?;

        Unit::try_from(row)
    }

    async fn list_all(&self) -> Result<Vec<Unit>, AppError> {
        let query = format!(
            "SELECT {} FROM ambulance_units ORDER BY registered_at",
            UNIT_COLUMNS
        );

        let rows = self
            .with_deadline("listing units", async {
                sqlx::query_as::<_, UnitRow>(&query)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| storage_error("listing units", e))
            })
            .await?;

        rows.into_iter().map(Unit::try_from).collect()
    }
}

/// Almacenamiento en memoria para desarrollo y tests.
///
/// La verificación de matrícula y la inserción ocurren bajo el mismo lock de
/// escritura.
#[derive(Default)]
pub struct InMemoryUnitRepository {
    units: RwLock<Vec<Unit>>,
    unavailable: AtomicBool,
}

impl InMemoryUnitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simular una caída del almacenamiento
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn ensure_available(&self, operation: &str) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(storage_error(operation, "in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UnitStore for InMemoryUnitRepository {
    async fn insert(&self, unit: NewUnit) -> Result<Unit, AppError> {
        self.ensure_available("inserting unit")?;

        let mut units = self.units.write().await;
        if units.iter().any(|u| u.vehicle_number == unit.vehicle_number) {
            return Err(AppError::DuplicateUnit(unit.vehicle_number));
        }

        let stored = unit.into_unit(Uuid::new_v4(), Utc::now());
        units.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Unit>, AppError> {
        self.ensure_available("listing units")?;
        Ok(self.units.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::unit::{Coordinate, VehicleType};
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    // Error de base de datos mínimo con un `ErrorKind` fijo
    #[derive(Debug)]
    struct FakeDbError(ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake database error: {:?}", self.0)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            match self.0 {
                ErrorKind::UniqueViolation => Some(Cow::Borrowed("23505")),
                _ => Some(Cow::Borrowed("23514")),
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                _ => ErrorKind::CheckViolation,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError(kind)))
    }

    fn new_unit(vehicle_number: &str) -> NewUnit {
        NewUnit {
            name: "Lifeline".into(),
            contact_number: "011-4000".into(),
            vehicle_number: vehicle_number.into(),
            vehicle_type: VehicleType::Basic,
            location: Coordinate::new(28.6139, 77.2090),
            driver_name: "Asha".into(),
            driver_contact: "9810000001".into(),
            address: String::new(),
            city: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let repo = InMemoryUnitRepository::new();
        let before = Utc::now();
        let unit = repo.insert(new_unit("DL-1")).await.unwrap();

        assert!(unit.registered_at >= before);
        assert_eq!(repo.list_all().await.unwrap(), vec![unit]);
    }

    #[tokio::test]
    async fn test_duplicate_vehicle_number_is_rejected() {
        let repo = InMemoryUnitRepository::new();
        repo.insert(new_unit("DL-1")).await.unwrap();

        let err = repo.insert(new_unit("DL-1")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUnit(ref v) if v == "DL-1"));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_reports_error() {
        let repo = InMemoryUnitRepository::new();
        repo.set_available(false);

        assert!(matches!(repo.list_all().await, Err(AppError::StorageUnavailable(_))));
        assert!(matches!(
            repo.insert(new_unit("DL-2")).await,
            Err(AppError::StorageUnavailable(_))
        ));

        repo.set_available(true);
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate_unit() {
        let err = map_insert_error(db_error(ErrorKind::UniqueViolation), "DL-01-AB-1234");
        assert!(matches!(err, AppError::DuplicateUnit(ref v) if v == "DL-01-AB-1234"));
        assert_eq!(err.code(), "DUPLICATE_UNIT");
    }

    #[test]
    fn test_other_insert_errors_map_to_storage_unavailable() {
        let err = map_insert_error(db_error(ErrorKind::CheckViolation), "DL-1");
        assert!(matches!(err, AppError::StorageUnavailable(_)));

        let err = map_insert_error(sqlx::Error::PoolTimedOut, "DL-1");
        assert!(matches!(err, AppError::StorageUnavailable(ref msg) if msg.contains("inserting unit")));
    }

    #[test]
    fn test_row_with_unknown_vehicle_type_is_rejected() {
        let row = UnitRow {
            id: Uuid::new_v4(),
            name: "x".into(),
            contact_number: "x".into(),
            vehicle_number: "x".into(),
            vehicle_type: "hovercraft".into(),
            latitude: 0.0,
            longitude: 0.0,
            driver_name: "x".into(),
            driver_contact: "x".into(),
            address: String::new(),
            city: String::new(),
            registered_at: Utc::now(),
        };
        assert!(matches!(Unit::try_from(row), Err(AppError::Internal(_))));
    }
}
