//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto razonable; sólo un valor mal formado es error.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Tamaño máximo del cuerpo por defecto: los data URIs de imágenes son grandes
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Límites de coste que acepta bcrypt
pub const MIN_PIN_HASH_COST: u32 = 4;
pub const MAX_PIN_HASH_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("PIN_HASH_COST must be between 4 and 31, got {0}")]
    InvalidHashCost(u32),
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub pin_hash_cost: u32,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3001,
            host: "0.0.0.0".to_string(),
            database_path: PathBuf::from("./database.sqlite"),
            cors_origins: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            pin_hash_cost: bcrypt::DEFAULT_COST,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Leer la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_number(&lookup, "PORT")?.unwrap_or(defaults.port);
        let max_body_bytes =
            parse_number(&lookup, "MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes);
        let pin_hash_cost =
            parse_number(&lookup, "PIN_HASH_COST")?.unwrap_or(defaults.pin_hash_cost);
        if !(MIN_PIN_HASH_COST..=MAX_PIN_HASH_COST).contains(&pin_hash_cost) {
            return Err(ConfigError::InvalidHashCost(pin_hash_cost));
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: lookup("HOST").unwrap_or(defaults.host),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            cors_origins,
            max_body_bytes,
            pin_hash_cost,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.database_path, PathBuf::from("./database.sqlite"));
        assert!(config.cors_origins.is_empty());
        assert!(config.is_development());
    }

    #[test]
    fn test_values_from_environment() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATABASE_PATH", "/var/lib/flotte.sqlite"),
            ("CORS_ORIGINS", "http://localhost:5173, http://localhost:5174"),
            ("PIN_HASH_COST", "6"),
        ]))
        .unwrap();
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("/var/lib/flotte.sqlite"));
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.pin_hash_cost, 6);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "drei")]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { name: "PORT", .. })));
    }

    #[test]
    fn test_hash_cost_out_of_range() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[("PIN_HASH_COST", "2")]));
        assert!(matches!(result, Err(ConfigError::InvalidHashCost(2))));

        let result = EnvironmentConfig::from_lookup(lookup_from(&[("PIN_HASH_COST", "32")]));
        assert!(matches!(result, Err(ConfigError::InvalidHashCost(32))));
    }

    #[test]
    fn test_hash_cost_bounds_are_accepted() {
        for cost in ["4", "31"] {
            let config =
                EnvironmentConfig::from_lookup(lookup_from(&[("PIN_HASH_COST", cost)])).unwrap();
            assert_eq!(config.pin_hash_cost.to_string(), cost);
        }
    }

    #[test]
    fn test_min_hash_cost_is_usable_by_bcrypt() {
        let hashed = bcrypt::hash("1234", MIN_PIN_HASH_COST).unwrap();
        assert!(bcrypt::verify("1234", &hashed).unwrap());
    }
}
