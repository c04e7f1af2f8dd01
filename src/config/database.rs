//! Configuración de base de datos
//!
//! Este módulo maneja la configuración de la conexión SQLite con SQLx.
//! La aplicación trabaja con un único handle compartido: el pool tiene
//! como máximo una conexión.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl DatabaseConfig {
    /// Configuración para un fichero SQLite en disco
    pub fn from_path(path: &Path) -> Self {
        Self {
            url: format!("sqlite://{}", path.display()),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: None,
        }
    }

    /// Base de datos en memoria, aislada por instancia (tests)
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: None,
        }
    }

    /// Opciones de conexión: WAL y claves foráneas activadas
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true))
    }

    /// Crear el pool de conexiones
    pub async fn create_pool(&self) -> Result<SqlitePool, sqlx::Error> {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(1)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(None)
            .connect_with(self.connect_options()?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_single_connection() {
        let config = DatabaseConfig::from_path(Path::new("/tmp/flotte.sqlite"));
        assert_eq!(config.url, "sqlite:///tmp/flotte.sqlite");
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_in_memory_options_parse() {
        let config = DatabaseConfig::in_memory();
        assert!(config.connect_options().is_ok());
    }
}
