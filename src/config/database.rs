//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use anyhow::{anyhow, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Leer la configuración desde el entorno; `DATABASE_URL` es obligatoria
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow!("DATABASE_URL must be set when STORAGE_BACKEND=postgres"))?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow!("DATABASE_MAX_CONNECTIONS must be a valid number: {}", e))?,
            Err(_) => 20,
        };

        Ok(Self::with_url(url, max_connections))
    }

    pub fn with_url(url: String, max_connections: u32) -> Self {
        Self {
            url,
            max_connections,
            min_connections: max_connections.min(5),
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_connections_never_exceeds_max() {
        let config = DatabaseConfig::with_url("postgresql://localhost/dispatch".into(), 2);
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.min_connections, 2);

        let config = DatabaseConfig::with_url("postgresql://localhost/dispatch".into(), 20);
        assert_eq!(config.min_connections, 5);
    }
}
