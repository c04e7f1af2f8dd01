//! Migración aditiva de la tabla `vehicles`
//!
//! Añade las columnas del catálogo que falten en bases de datos antiguas.
//! Cada columna se añade por separado: un fallo se registra y no detiene
//! el resto. Después se convierten a hash los PIN guardados en texto plano.

use sqlx::Row;
use tracing::{error, info, warn};

use crate::database::schema::SchemaManager;
use crate::dto::vehicle_dto::{VehicleField, VEHICLE_FIELDS};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::pin::{hash_pin, is_pin_hash};

/// Resultado de una pasada de migración
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub added: Vec<String>,
    pub failed: Vec<String>,
    pub rehashed_pins: usize,
}

impl SchemaManager {
    /// Columnas existentes de `vehicles`
    pub async fn vehicle_columns(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query("PRAGMA table_info(vehicles)")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(AppError::from))
            .collect()
    }

    pub async fn migrate(&self) -> AppResult<MigrationReport> {
        info!("🔄 Iniciando migración de la base de datos...");

        let mut report = MigrationReport::default();
        self.add_missing_columns(VEHICLE_FIELDS.iter().filter(|f| !f.required), &mut report)
            .await?;

        if report.added.is_empty() && report.failed.is_empty() {
            info!("✅ Todas las columnas existen - no hace falta migrar");
        } else {
            info!(
                "✅ Migración terminada: {} columna(s) añadida(s), {} fallida(s)",
                report.added.len(),
                report.failed.len()
            );
        }

        report.rehashed_pins = self.hash_plaintext_pins().await?;
        Ok(report)
    }

    /// Añadir cada columna que falte. SQLite no distingue mayúsculas en los
    /// nombres de columna, así que la comparación tampoco.
    async fn add_missing_columns<'f>(
        &self,
        fields: impl Iterator<Item = &'f VehicleField>,
        report: &mut MigrationReport,
    ) -> AppResult<()> {
        let existing = self.vehicle_columns().await?;

        for field in fields {
            if existing.iter().any(|c| c.eq_ignore_ascii_case(field.column)) {
                continue;
            }

            let sql = format!(
                "ALTER TABLE vehicles ADD COLUMN {} {}",
                field.column,
                field.kind.sql_type()
            );
            match sqlx::query(&sql).execute(&self.pool).await {
                Ok(_) => {
                    info!("  ✅ Columna añadida: {} ({})", field.column, field.kind.sql_type());
                    report.added.push(field.column.to_string());
                }
                Err(e) => {
                    error!("  ❌ Error añadiendo {}: {}", field.column, e);
                    report.failed.push(field.column.to_string());
                }
            }
        }
        Ok(())
    }

    /// Sustituir los PIN en texto plano por su hash bcrypt
    async fn hash_plaintext_pins(&self) -> AppResult<usize> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, pin FROM vehicles WHERE pin IS NOT NULL")
                .fetch_all(&self.pool)
                .await?;

        let mut rehashed = 0;
        for (id, pin) in rows.into_iter().filter(|(_, pin)| !is_pin_hash(pin)) {
            let hashed = hash_pin(&pin, self.pin_hash_cost)?;
            match sqlx::query("UPDATE vehicles SET pin = ? WHERE id = ?")
                .bind(hashed)
                .bind(id)
                .execute(&self.pool)
                .await
            {
                Ok(_) => rehashed += 1,
                Err(e) => warn!("⚠️ No se pudo convertir el PIN del vehículo {}: {}", id, e),
            }
        }

        if rehashed > 0 {
            info!("🔐 {} PIN(s) en texto plano convertidos a hash", rehashed);
        }
        Ok(rehashed)
    }
}
