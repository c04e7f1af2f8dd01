//! Módulo de base de datos
//!
//! Maneja la conexión SQLite, el esquema, las migraciones y los datos de ejemplo.

pub mod connection;
pub mod migrate;
pub mod schema;
pub mod seed;

pub use connection::{DatabaseConnection, DatabaseError};
pub use migrate::MigrationReport;
pub use schema::SchemaManager;
