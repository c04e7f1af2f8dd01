//! Middleware del sistema
//!
//! CORS, registro de peticiones y captura de panics.

pub mod cors;
pub mod panic;
pub mod request_logging;

pub use cors::cors_middleware;
pub use panic::catch_panic_layer;
pub use request_logging::log_request;
