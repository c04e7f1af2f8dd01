//! Registro de peticiones
//!
//! Una línea por petición con marca de tiempo, método y ruta.

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{SecondsFormat, Utc};
use tracing::info;

pub async fn log_request(request: Request, next: Next) -> Response {
    info!(
        "{} - {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        request.method(),
        request.uri().path()
    );
    next.run(request).await
}
