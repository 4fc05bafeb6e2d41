//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Cargo exceeds vehicle capacity: requested {requested} kg, capacity {capacity} kg")]
    CapacityExceeded {
        vehicle_id: Uuid,
        capacity: Decimal,
        /// Tal como llegó; puede exceder el rango de `Decimal`
        requested: String,
    },

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    /// Código estable que acompaña al mensaje en el cuerpo de error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) => "DB_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::CapacityExceeded { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Solo los conflictos de concurrencia pueden reintentarse sin efectos parciales
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let error_response = match &self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                ErrorResponse {
                    error: "An error occurred while accessing the database".to_string(),
                    code,
                    details: None,
                }
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                ErrorResponse {
                    error: "An unexpected error occurred".to_string(),
                    code,
                    details: None,
                }
            }

            AppError::CapacityExceeded { vehicle_id, capacity, requested } => {
                warn!(
                    "⚖️ Capacity exceeded for vehicle {}: {} > {}",
                    vehicle_id, requested, capacity
                );
                ErrorResponse {
                    error: self.to_string(),
                    code,
                    details: Some(json!({
                        "vehicleId": vehicle_id,
                        "capacity": capacity.to_string(),
                        "requested": requested,
                    })),
                }
            }

            other => {
                warn!("⚠️ {}: {}", code, other);
                ErrorResponse {
                    error: other.to_string(),
                    code,
                    details: other.is_retryable().then(|| json!({ "retryable": true })),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// `campo: regla (límites)` por cada error, sin repetir el valor recibido
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    let mut limits: Vec<String> = error
                        .params
                        .iter()
                        .filter(|(name, _)| name.as_ref() != "value")
                        .map(|(name, limit)| format!("{} {}", name, limit))
                        .collect();
                    limits.sort();

                    if limits.is_empty() {
                        format!("{}: {}", field, error.code)
                    } else {
                        format!("{}: {} ({})", field, error.code, limits.join(", "))
                    }
                })
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join("; "))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &Uuid) -> AppError {
    AppError::NotFound(format!("{} not found: {}", resource, id))
}

/// Función helper para crear errores de conflicto de concurrencia
pub fn conflict_error(resource: &str, id: &Uuid) -> AppError {
    AppError::Conflict(format!(
        "{} {} was modified concurrently, retry the request",
        resource, id
    ))
}
