use sqlx::SqlitePool;

use crate::database::schema::NOW_SQL;
use crate::dto::driver_dto::{NewIncidentReport, NewMaintenanceReport};
use crate::models::report::{IncidentReport, IncidentStatus, MaintenanceReport, MaintenanceStatus};
use crate::utils::errors::{AppError, AppResult};

const VEHICLE_NOT_FOUND: &str = "Fahrzeug nicht gefunden";

/// Acceso a Schadens- y Wartungsmeldungen
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_incident(&self, report: NewIncidentReport) -> AppResult<IncidentReport> {
        let sql = format!(
            r#"
            INSERT INTO incident_reports (
                fahrzeug_id, datum, km_stand, beschreibung, schadensart, schweregrad,
                status, melder, bemerkungen
            ) VALUES (?, {}, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
            NOW_SQL
        );

        sqlx::query_as::<_, IncidentReport>(&sql)
            .bind(report.fahrzeug_id)
            .bind(report.km_stand)
            .bind(report.beschreibung)
            .bind(report.schadensart)
            .bind(report.schweregrad)
            .bind(IncidentStatus::default())
            .bind(report.melder)
            .bind(report.bemerkungen)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, VEHICLE_NOT_FOUND, VEHICLE_NOT_FOUND))
    }

    /// Meldungen de un vehículo, la más reciente primero
    pub async fn incidents_for_vehicle(&self, fahrzeug_id: i64) -> AppResult<Vec<IncidentReport>> {
        let reports = sqlx::query_as::<_, IncidentReport>(
            "SELECT * FROM incident_reports WHERE fahrzeug_id = ? ORDER BY datum DESC, id DESC",
        )
        .bind(fahrzeug_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn all_incidents(&self) -> AppResult<Vec<IncidentReport>> {
        let reports = sqlx::query_as::<_, IncidentReport>(
            "SELECT * FROM incident_reports ORDER BY datum DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn update_incident_status(
        &self,
        id: i64,
        status: IncidentStatus,
    ) -> AppResult<Option<IncidentReport>> {
        let sql = format!(
            "UPDATE incident_reports SET status = ?, updated_at = {} WHERE id = ? RETURNING *",
            NOW_SQL
        );
        let report = sqlx::query_as::<_, IncidentReport>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(report)
    }

    pub async fn create_maintenance(
        &self,
        report: NewMaintenanceReport,
    ) -> AppResult<MaintenanceReport> {
        let sql = format!(
            r#"
            INSERT INTO maintenance_requests (
                fahrzeug_id, datum, km_stand, beschreibung, dringlichkeit,
                status, melder, bemerkungen
            ) VALUES (?, {}, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
            NOW_SQL
        );

        sqlx::query_as::<_, MaintenanceReport>(&sql)
            .bind(report.fahrzeug_id)
            .bind(report.km_stand)
            .bind(report.beschreibung)
            .bind(report.dringlichkeit)
            .bind(MaintenanceStatus::default())
            .bind(report.melder)
            .bind(report.bemerkungen)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, VEHICLE_NOT_FOUND, VEHICLE_NOT_FOUND))
    }

    pub async fn maintenance_for_vehicle(&self, fahrzeug_id: i64) -> AppResult<Vec<MaintenanceReport>> {
        let reports = sqlx::query_as::<_, MaintenanceReport>(
            "SELECT * FROM maintenance_requests WHERE fahrzeug_id = ? ORDER BY datum DESC, id DESC",
        )
        .bind(fahrzeug_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn all_maintenance(&self) -> AppResult<Vec<MaintenanceReport>> {
        let reports = sqlx::query_as::<_, MaintenanceReport>(
            "SELECT * FROM maintenance_requests ORDER BY datum DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn update_maintenance_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
    ) -> AppResult<Option<MaintenanceReport>> {
        let sql = format!(
            "UPDATE maintenance_requests SET status = ?, updated_at = {} WHERE id = ? RETURNING *",
            NOW_SQL
        );
        let report = sqlx::query_as::<_, MaintenanceReport>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(report)
    }
}
