//! Esquema SQLite del backend de flota
//!
//! La tabla `vehicles` se genera a partir del catálogo de campos para que
//! DDL, migración y lista blanca de escritura no diverjan. Las tablas hijas
//! referencian `vehicles(id)` con `ON DELETE CASCADE`.

use sqlx::SqlitePool;
use tracing::info;

use crate::dto::vehicle_dto::VEHICLE_FIELDS;
use crate::utils::errors::AppResult;

/// Marca de tiempo RFC 3339 con milisegundos, generada por SQLite
pub const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Tablas hijas e índices
pub const CHILD_TABLES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS fuel_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fahrzeug_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
    datum TEXT NOT NULL,
    km_stand REAL NOT NULL,
    liter REAL NOT NULL,
    kosten REAL NOT NULL,
    tankstelle TEXT,
    voll_tankung INTEGER NOT NULL DEFAULT 1,
    bemerkungen TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS trip_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fahrzeug_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
    datum TEXT NOT NULL,
    km_start REAL NOT NULL,
    km_ende REAL NOT NULL,
    km_gesamt REAL NOT NULL,
    nutzer TEXT,
    zweck TEXT,
    route TEXT,
    bemerkungen TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS incident_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fahrzeug_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
    datum TEXT NOT NULL,
    km_stand REAL NOT NULL,
    beschreibung TEXT NOT NULL,
    schadensart TEXT NOT NULL CHECK (schadensart IN ('Unfall', 'Kratzer', 'Delle', 'Technisch', 'Sonstiges')),
    schweregrad TEXT NOT NULL CHECK (schweregrad IN ('Leicht', 'Mittel', 'Schwer')),
    status TEXT NOT NULL DEFAULT 'Gemeldet' CHECK (status IN ('Gemeldet', 'In Bearbeitung', 'Repariert', 'Abgeschlossen')),
    melder TEXT,
    bemerkungen TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS maintenance_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fahrzeug_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
    datum TEXT NOT NULL,
    km_stand REAL NOT NULL,
    wartungsart TEXT NOT NULL CHECK (wartungsart IN ('Inspektion', 'Ölwechsel', 'Reifen', 'TÜV/HU', 'AU', 'Sonstiges')),
    beschreibung TEXT NOT NULL,
    kosten REAL,
    werkstatt TEXT,
    naechste_wartung_km REAL,
    naechste_wartung_datum TEXT,
    status TEXT NOT NULL DEFAULT 'Geplant' CHECK (status IN ('Geplant', 'Durchgeführt', 'Überfällig')),
    bemerkungen TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS maintenance_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fahrzeug_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
    datum TEXT NOT NULL,
    km_stand REAL NOT NULL,
    beschreibung TEXT NOT NULL,
    dringlichkeit TEXT NOT NULL CHECK (dringlichkeit IN ('Niedrig', 'Mittel', 'Hoch', 'Sofort')),
    status TEXT NOT NULL DEFAULT 'Gemeldet' CHECK (status IN ('Gemeldet', 'Bestätigt', 'Geplant', 'Erledigt')),
    melder TEXT,
    bemerkungen TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_fuel_entries_fahrzeug ON fuel_entries(fahrzeug_id);
CREATE INDEX IF NOT EXISTS idx_trip_log_fahrzeug ON trip_log(fahrzeug_id);
CREATE INDEX IF NOT EXISTS idx_incident_reports_fahrzeug ON incident_reports(fahrzeug_id, datum);
CREATE INDEX IF NOT EXISTS idx_maintenance_reports_fahrzeug ON maintenance_reports(fahrzeug_id);
CREATE INDEX IF NOT EXISTS idx_maintenance_requests_fahrzeug ON maintenance_requests(fahrzeug_id, datum)
"#;

/// DDL de `vehicles`, derivado del catálogo de campos
pub fn vehicles_ddl() -> String {
    let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
    for field in VEHICLE_FIELDS {
        let constraint = match (field.required, field.column) {
            (true, "kennzeichen") => " UNIQUE NOT NULL",
            (true, _) => " NOT NULL",
            (false, _) => "",
        };
        columns.push(format!("{} {}{}", field.column, field.kind.sql_type(), constraint));
    }
    columns.push(format!("created_at TEXT NOT NULL DEFAULT ({})", NOW_SQL));
    columns.push(format!("updated_at TEXT NOT NULL DEFAULT ({})", NOW_SQL));

    format!(
        "CREATE TABLE IF NOT EXISTS vehicles (\n    {}\n)",
        columns.join(",\n    ")
    )
}

/// Gestor del esquema: creación, migración aditiva y datos de ejemplo
#[derive(Debug, Clone)]
pub struct SchemaManager {
    pub(crate) pool: SqlitePool,
    pub(crate) pin_hash_cost: u32,
}

impl SchemaManager {
    pub fn new(pool: SqlitePool, pin_hash_cost: u32) -> Self {
        Self { pool, pin_hash_cost }
    }

    /// Crear todas las tablas si no existen (idempotente)
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(&vehicles_ddl()).execute(&self.pool).await?;

        // sqlx::query no admite varias sentencias a la vez
        for stmt in CHILD_TABLES_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        info!("✅ Tablas de la base de datos verificadas");
        Ok(())
    }

    /// Ejecutar los tres pasos de arranque en orden
    pub async fn bootstrap(&self) -> AppResult<()> {
        self.ensure_schema().await?;
        self.migrate().await?;
        self.seed().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    async fn manager() -> SchemaManager {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        SchemaManager::new(pool, crate::config::MIN_PIN_HASH_COST)
    }

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[test]
    fn test_vehicles_ddl_contains_constraints() {
        let ddl = vehicles_ddl();
        assert!(ddl.contains("kennzeichen TEXT UNIQUE NOT NULL"));
        assert!(ddl.contains("modell TEXT NOT NULL"));
        assert!(ddl.contains("aktueller_km_stand REAL,"));
        assert!(!ddl.contains("DEFAULT 0"));
    }

    #[tokio::test]
    async fn test_ensure_schema_creates_all_tables() {
        let manager = manager().await;
        manager.ensure_schema().await.unwrap();
        assert_eq!(
            table_names(&manager.pool).await,
            vec![
                "fuel_entries",
                "incident_reports",
                "maintenance_reports",
                "maintenance_requests",
                "trip_log",
                "vehicles",
            ]
        );
    }

    #[tokio::test]
    async fn test_bootstrap_twice_is_idempotent() {
        let manager = manager().await;
        manager.bootstrap().await.unwrap();
        manager.bootstrap().await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&manager.pool)
            .await
            .unwrap();
        assert_eq!(count, 2);

        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('vehicles')")
            .fetch_all(&manager.pool)
            .await
            .unwrap();
        assert_eq!(columns.len(), VEHICLE_FIELDS.len() + 3);
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_unknown_category() {
        let manager = manager().await;
        manager.bootstrap().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO incident_reports (fahrzeug_id, datum, km_stand, beschreibung, schadensart, schweregrad)
             VALUES (1, '2024-01-01', 10, 'x', 'Hagel', 'Leicht')",
        )
        .execute(&manager.pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_deleting_vehicle_cascades_to_reports() {
        let manager = manager().await;
        manager.bootstrap().await.unwrap();

        for _ in 0..2 {
            sqlx::query(
                "INSERT INTO incident_reports (fahrzeug_id, datum, km_stand, beschreibung, schadensart, schweregrad)
                 VALUES (1, '2024-01-01', 10, 'Kratzer an der Tür', 'Kratzer', 'Leicht')",
            )
            .execute(&manager.pool)
            .await
            .unwrap();
        }
        sqlx::query("DELETE FROM vehicles WHERE id = 1")
            .execute(&manager.pool)
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incident_reports")
            .fetch_one(&manager.pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
