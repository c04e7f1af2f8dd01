//! Rutas HTTP
//!
//! `create_app_router` monta los dos recursos bajo sus prefijos ingleses y
//! alemanes y aplica las capas comunes.

pub mod driver_routes;
pub mod vehicle_routes;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;

use crate::middleware::{catch_panic_layer, cors_middleware, log_request};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const VEHICLE_PREFIXES: [&str; 2] = ["/api/vehicles", "/api/fahrzeuge"];
pub const DRIVER_PREFIXES: [&str; 2] = ["/api/drivers", "/api/fahrer"];

pub fn create_app_router(state: AppState) -> Router {
    let mut router = Router::new().route("/", get(service_info));

    for prefix in VEHICLE_PREFIXES {
        router = router.nest(prefix, vehicle_routes::create_vehicle_router());
    }
    for prefix in DRIVER_PREFIXES {
        router = router.nest(prefix, driver_routes::create_driver_router());
    }

    let cors = cors_middleware(&state.config.cors_origins);
    let body_limit = state.config.max_body_bytes;

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_request))
        .layer(catch_panic_layer())
        .layer(cors)
        .with_state(state)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Fahrzeug Plus Flotten-API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "fahrzeuge": VEHICLE_PREFIXES[1],
            "fahrer": DRIVER_PREFIXES[1],
            "vehicles": VEHICLE_PREFIXES[0],
            "drivers": DRIVER_PREFIXES[0],
        }
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Route nicht gefunden".to_string())
}
