//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Cada variable tiene un valor por defecto documentado; un valor presente
//! pero inválido hace fallar el arranque.

use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::dispatch_matcher::DispatchOptions;
use crate::utils::validation::validate_positive;

/// Backend de almacenamiento de unidades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub storage_timeout: Duration,
    /// Radio de búsqueda en km (5 km por defecto)
    pub dispatch_radius_km: f64,
    /// Máximo de candidatos por despacho (10 por defecto)
    pub dispatch_max_results: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let options = DispatchOptions::default();
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            storage_backend: StorageBackend::Postgres,
            storage_timeout: Duration::from_secs(5),
            dispatch_radius_km: options.radius_km,
            dispatch_max_results: options.max_results,
        }
    }
}

/// Leer una variable opcional y parsearla, con contexto en el error
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("{} must be valid: {}", name, e)),
        _ => Ok(None),
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            storage_backend: parse_var("STORAGE_BACKEND")?.unwrap_or(defaults.storage_backend),
            storage_timeout: parse_var::<u64>("STORAGE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.storage_timeout),
            dispatch_radius_km: parse_var("DISPATCH_RADIUS_KM")?.unwrap_or(defaults.dispatch_radius_km),
            dispatch_max_results: parse_var("DISPATCH_MAX_RESULTS")?
                .unwrap_or(defaults.dispatch_max_results),
        };

        config.validate()?;
        Ok(config)
    }

    /// Verificar que la política de despacho sea coherente
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.dispatch_radius_km)
            .map_err(|e| anyhow!("DISPATCH_RADIUS_KM must be positive: {}", e))?;
        if !self.dispatch_radius_km.is_finite() {
            return Err(anyhow!("DISPATCH_RADIUS_KM must be finite"));
        }
        validate_positive(self.dispatch_max_results)
            .map_err(|e| anyhow!("DISPATCH_MAX_RESULTS must be positive: {}", e))?;
        validate_positive(self.storage_timeout.as_secs())
            .map_err(|e| anyhow!("STORAGE_TIMEOUT_SECS must be at least 1: {}", e))?;
        Ok(())
    }

    /// Política de despacho derivada de la configuración
    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            radius_km: self.dispatch_radius_km,
            max_results: self.dispatch_max_results,
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
