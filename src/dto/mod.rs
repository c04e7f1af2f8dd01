//! Data Transfer Objects
//!
//! Estructuras de entrada y salida de la API.

pub mod driver_dto;
pub mod vehicle_dto;
