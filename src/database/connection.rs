//! Conexión a SQLite
//!
//! `DatabaseConnection` es el único dueño del handle de la base de datos.
//! Se construye en `main`, ejecuta el arranque del esquema una sola vez y
//! se cierra explícitamente al apagar el servidor.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::database::schema::SchemaManager;
use crate::utils::errors::AppError;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no se pudo abrir la base de datos: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("fallo al preparar el esquema: {0}")]
    Bootstrap(#[from] AppError),
}

#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir la base de datos y preparar esquema, migraciones y seed
    pub async fn connect(config: &DatabaseConfig, pin_hash_cost: u32) -> Result<Self, DatabaseError> {
        let pool = config.create_pool().await?;

        SchemaManager::new(pool.clone(), pin_hash_cost)
            .bootstrap()
            .await?;

        info!("✅ Base de datos conectada: {}", config.url);
        Ok(Self { pool })
    }

    /// Handle compartido para los handlers
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Liberar el handle. Llamarlo más de una vez no tiene efecto.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            debug!("ℹ️ La conexión a la base de datos ya estaba cerrada");
            return;
        }
        self.pool.close().await;
        info!("✅ Conexión a la base de datos cerrada");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_PIN_HASH_COST;

    #[tokio::test]
    async fn test_connect_bootstraps_and_close_is_idempotent() {
        let db = DatabaseConnection::connect(&DatabaseConfig::in_memory(), MIN_PIN_HASH_COST)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 2);

        db.close().await;
        assert!(db.is_closed());
        db.close().await;
        assert!(db.is_closed());
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let db = DatabaseConnection::connect(&DatabaseConfig::in_memory(), MIN_PIN_HASH_COST)
            .await
            .unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
