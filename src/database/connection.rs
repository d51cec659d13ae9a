//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos PostgreSQL y el schema
//! del registro de ambulancias.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Conexión a la base de datos con su pool
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear la conexión y asegurar el schema
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

        let pool = config.create_pool().await?;
        run_migrations(&pool).await?;

        info!("✅ PostgreSQL conectado exitosamente");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const CREATE_UNITS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ambulance_units (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) > 0),
    contact_number TEXT NOT NULL CHECK (length(contact_number) > 0),
    vehicle_number TEXT NOT NULL UNIQUE CHECK (length(vehicle_number) > 0),
    vehicle_type TEXT NOT NULL DEFAULT 'basic'
        CHECK (vehicle_type IN ('basic', 'advanced', 'patient-transport', 'neonatal', 'air')),
    latitude DOUBLE PRECISION NOT NULL CHECK (latitude BETWEEN -90 AND 90),
    longitude DOUBLE PRECISION NOT NULL CHECK (longitude BETWEEN -180 AND 180),
    driver_name TEXT NOT NULL CHECK (length(driver_name) > 0),
    driver_contact TEXT NOT NULL CHECK (length(driver_contact) > 0),
    address TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    registered_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_UNITS_TABLE).execute(pool).await?;
    info!("📦 Tabla ambulance_units lista");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
