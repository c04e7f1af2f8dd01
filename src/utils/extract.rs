//! Extractores propios
//!
//! Igual que `axum::Json` y `axum::extract::Path`, pero los rechazos se
//! devuelven como `AppError` con el cuerpo de error estándar de la API.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::utils::errors::{not_found_error, AppError};

pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => {
            AppError::BadRequest(format!("Ungültige Anfragedaten: {}", e.body_text()))
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::BadRequest("Anfrage enthält kein gültiges JSON".to_string())
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Content-Type application/json erwartet".to_string())
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Parámetro de ruta. Un id que no se puede interpretar no corresponde a
/// ningún recurso, así que se responde 404.
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(AppPath(value)),
            Err(rejection) => {
                tracing::debug!("Parámetro de ruta rechazado: {}", rejection.body_text());
                Err(not_found_error("Ressource"))
            }
        }
    }
}
