//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a las tablas SQLite.

pub mod report;
pub mod vehicle;

pub use report::{
    IncidentCategory, IncidentReport, IncidentSeverity, IncidentStatus, MaintenanceReport,
    MaintenanceStatus, MaintenanceUrgency,
};
pub use vehicle::Vehicle;
