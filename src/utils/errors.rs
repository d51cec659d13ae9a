//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("An ambulance with vehicle number '{0}' already exists")]
    DuplicateUnit(String),

    #[error("No ambulances registered in the system")]
    NoUnitsRegistered,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Código estable expuesto a los clientes
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateUnit(_) => "DUPLICATE_UNIT",
            AppError::NoUnitsRegistered => "NO_UNITS_REGISTERED",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateUnit(_) => StatusCode::CONFLICT,
            AppError::NoUnitsRegistered => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let error_response = match self {
            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                ErrorResponse::new(
                    "Validation Error",
                    "Missing or invalid fields. Please provide all required information.".to_string(),
                    code,
                )
                .with_details(json!(e))
            }

            AppError::DuplicateUnit(vehicle_number) => {
                warn!("⚠️ Duplicate vehicle number: {}", vehicle_number);
                ErrorResponse::new(
                    "Duplicate Unit",
                    format!("An ambulance with vehicle number '{}' already exists", vehicle_number),
                    code,
                )
                .with_details(json!({ "vehicleNumber": vehicle_number }))
            }

            AppError::NoUnitsRegistered => {
                warn!("⚠️ Dispatch requested with an empty registry");
                ErrorResponse::new(
                    "Not Found",
                    "No ambulances registered in the system".to_string(),
                    code,
                )
            }

            AppError::StorageUnavailable(msg) => {
                error!("❌ Storage unavailable: {}", msg);
                ErrorResponse::new(
                    "Service Unavailable",
                    "The unit registry is temporarily unavailable. Please retry".to_string(),
                    code,
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, code)
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    code,
                )
                .with_details(json!({ "internal_error": msg }))
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para errores del almacenamiento
pub fn storage_error(operation: &str, cause: impl std::fmt::Display) -> AppError {
    AppError::StorageUnavailable(format!("{}: {}", operation, cause))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::DuplicateUnit("DL-1".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NoUnitsRegistered.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::StorageUnavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Validation(validator::ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_error_message() {
        let err = storage_error("listing units", "connection refused");
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
        assert!(err.to_string().contains("connection refused"));
    }
}
