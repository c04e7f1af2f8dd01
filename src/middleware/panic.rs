//! Captura de panics en handlers
//!
//! Un panic dentro de un handler se convierte en un 500 con el cuerpo de
//! error estándar; el detalle sólo va al log.

use std::any::Any;

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<Body>;

pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic sin mensaje".to_string()
    };
    error!("💥 Unbehandelter Fehler: {}", detail);

    let body = json!({
        "error": "Internal Server Error",
        "message": "Interner Serverfehler",
        "code": "INTERNAL_ERROR",
    });

    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_panic_becomes_generic_json_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Interner Serverfehler");
        assert!(!body.to_string().contains("boom"));
    }
}
