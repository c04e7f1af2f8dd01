//! Repositorios
//!
//! Acceso a datos con consultas `sqlx` parametrizadas.

pub mod report_repository;
pub mod vehicle_repository;

pub use report_repository::ReportRepository;
pub use vehicle_repository::VehicleRepository;
