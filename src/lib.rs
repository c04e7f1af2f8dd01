//! Backend de flota Fahrzeug Plus
//!
//! API REST sobre SQLite para el cliente de administración (fichas de
//! vehículos) y la app de conductores (kilometraje, daños, mantenimiento).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
