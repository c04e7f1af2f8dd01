//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del backend de flota
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
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
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl AppError {
    /// Traduce violaciones de restricciones de SQLite a errores de dominio.
    ///
    /// `UNIQUE` se convierte en `Conflict`, una clave foránea inexistente en
    /// `NotFound`; el resto queda como error de base de datos.
    pub fn from_db(err: sqlx::Error, conflict: &str, missing_parent: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(conflict.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound(missing_parent.to_string());
            }
        }
        AppError::Database(err)
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: code.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "Interner Serverfehler".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Error de validación: {}", e);
                let message = validation_message(&e);
                let mut body = ErrorResponse::new("Validation Error", message, "VALIDATION_ERROR");
                body.details = Some(json!(e));
                (StatusCode::BAD_REQUEST, body)
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflict", msg, "CONFLICT"),
            ),

            AppError::BadRequest(msg) => {
                warn!("⚠️ Solicitud incorrecta: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }

            AppError::Hash(e) => {
                error!("❌ Error de hash de PIN: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "Interner Serverfehler".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Primer mensaje legible de un conjunto de errores de validación
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Ungültige Eingabedaten".to_string())
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("required");
    error.message = Some(message.to_string().into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} nicht gefunden", resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request_with_message() {
        let (status, body) = body_json(validation_error("modell", "Modell fehlt")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Modell fehlt");
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_details() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Interner Serverfehler");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_not_found_helper() {
        let (status, body) = body_json(not_found_error("Fahrzeug")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Fahrzeug nicht gefunden");
    }

    #[tokio::test]
    async fn test_hash_error_is_generic_internal_error() {
        let err = bcrypt::hash("1234", 3).unwrap_err();
        let (status, body) = body_json(AppError::from(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Interner Serverfehler");
    }

    #[tokio::test]
    async fn test_conflict_and_bad_request_codes() {
        let (status, body) = body_json(AppError::Conflict("doppelt".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");

        let (status, body) = body_json(AppError::BadRequest("kaputt".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
