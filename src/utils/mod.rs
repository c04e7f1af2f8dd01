//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! hash de PIN y extracción de cuerpos JSON.

pub mod errors;
pub mod extract;
pub mod pin;
pub mod validation;
