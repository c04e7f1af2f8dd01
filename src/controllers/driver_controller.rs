use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::driver_dto::{
    CreateIncidentReportRequest, CreateMaintenanceReportRequest, LoginRequest,
    UpdateIncidentStatusRequest, UpdateKmStandRequest, UpdateMaintenanceStatusRequest,
};
use crate::models::report::{IncidentReport, MaintenanceReport};
use crate::models::vehicle::Vehicle;
use crate::repositories::report_repository::ReportRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::pin::verify_pin;

pub const LOGIN_FIELDS_MISSING: &str = "Kennzeichen und PIN sind erforderlich";
pub const LOGIN_REJECTED: &str = "Ungültiges Kennzeichen oder PIN";

/// Resultado de un intento de login
#[derive(Debug)]
pub enum LoginOutcome {
    Accepted(Vehicle),
    MissingFields,
    Rejected,
}

pub struct DriverController {
    vehicles: VehicleRepository,
    reports: ReportRepository,
}

impl DriverController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            reports: ReportRepository::new(pool),
        }
    }

    /// Comprobar Kennzeichen y PIN. Matrícula desconocida, vehículo sin PIN
    /// y PIN incorrecto se tratan igual.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let Some((kennzeichen, pin)) = request.credentials() else {
            return Ok(LoginOutcome::MissingFields);
        };

        let vehicle = self.vehicles.find_by_kennzeichen(kennzeichen).await?;
        let accepted = vehicle.filter(|v| {
            v.pin
                .as_deref()
                .map(|stored| verify_pin(pin, stored))
                .unwrap_or(false)
        });

        match accepted {
            Some(vehicle) => {
                info!("🔓 Fahrer-Login für {}", vehicle.kennzeichen);
                Ok(LoginOutcome::Accepted(vehicle))
            }
            None => {
                warn!("🔒 Fehlgeschlagener Fahrer-Login für {}", kennzeichen);
                Ok(LoginOutcome::Rejected)
            }
        }
    }

    pub async fn update_km_stand(&self, request: UpdateKmStandRequest) -> AppResult<()> {
        request.validate()?;
        let (Some(fahrzeug_id), Some(km_stand)) = (request.fahrzeug_id, request.km_stand) else {
            return Err(validation_error(
                "fahrzeugId",
                "Fahrzeug-ID und KM-Stand sind erforderlich",
            ));
        };

        if !self.vehicles.update_km_stand(fahrzeug_id, km_stand).await? {
            return Err(not_found_error("Fahrzeug"));
        }
        Ok(())
    }

    pub async fn create_incident(
        &self,
        request: CreateIncidentReportRequest,
    ) -> AppResult<IncidentReport> {
        request.validate()?;
        let report = request.into_new().ok_or_else(|| {
            validation_error(
                "schaden",
                "fahrzeugId, kmStand, beschreibung, schadensart und schweregrad sind Pflichtfelder",
            )
        })?;

        let created = self.reports.create_incident(report).await?;
        info!("⚠️ Schadensmeldung {} für Fahrzeug {}", created.id, created.fahrzeug_id);
        Ok(created)
    }

    pub async fn create_maintenance(
        &self,
        request: CreateMaintenanceReportRequest,
    ) -> AppResult<MaintenanceReport> {
        request.validate()?;
        let report = request.into_new().ok_or_else(|| {
            validation_error(
                "wartung",
                "fahrzeugId, kmStand, beschreibung und dringlichkeit sind Pflichtfelder",
            )
        })?;

        let created = self.reports.create_maintenance(report).await?;
        info!("🔧 Wartungsmeldung {} für Fahrzeug {}", created.id, created.fahrzeug_id);
        Ok(created)
    }

    pub async fn incidents_for_vehicle(&self, fahrzeug_id: i64) -> AppResult<Vec<IncidentReport>> {
        self.reports.incidents_for_vehicle(fahrzeug_id).await
    }

    pub async fn maintenance_for_vehicle(
        &self,
        fahrzeug_id: i64,
    ) -> AppResult<Vec<MaintenanceReport>> {
        self.reports.maintenance_for_vehicle(fahrzeug_id).await
    }

    pub async fn all_incidents(&self) -> AppResult<Vec<IncidentReport>> {
        self.reports.all_incidents().await
    }

    pub async fn all_maintenance(&self) -> AppResult<Vec<MaintenanceReport>> {
        self.reports.all_maintenance().await
    }

    pub async fn update_incident_status(
        &self,
        id: i64,
        request: UpdateIncidentStatusRequest,
    ) -> AppResult<IncidentReport> {
        self.reports
            .update_incident_status(id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Schadensmeldung"))
    }

    pub async fn update_maintenance_status(
        &self,
        id: i64,
        request: UpdateMaintenanceStatusRequest,
    ) -> AppResult<MaintenanceReport> {
        self.reports
            .update_maintenance_status(id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Wartungsmeldung"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::schema::SchemaManager;
    use crate::utils::errors::AppError;

    async fn setup() -> (DriverController, SqlitePool) {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        SchemaManager::new(pool.clone(), crate::config::MIN_PIN_HASH_COST)
            .bootstrap()
            .await
            .unwrap();
        (DriverController::new(pool.clone()), pool)
    }

    fn login(kennzeichen: Option<&str>, pin: Option<&str>) -> LoginRequest {
        LoginRequest {
            kennzeichen: kennzeichen.map(String::from),
            pin: pin.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let (controller, _pool) = setup().await;

        let ok = controller.login(login(Some("FZ-PLUS"), Some("1234"))).await.unwrap();
        assert!(matches!(ok, LoginOutcome::Accepted(v) if v.kennzeichen == "FZ-PLUS"));

        let wrong = controller.login(login(Some("FZ-PLUS"), Some("0000"))).await.unwrap();
        assert!(matches!(wrong, LoginOutcome::Rejected));

        let unknown = controller.login(login(Some("XX-0"), Some("1234"))).await.unwrap();
        assert!(matches!(unknown, LoginOutcome::Rejected));

        let missing = controller.login(login(Some("FZ-PLUS"), None)).await.unwrap();
        assert!(matches!(missing, LoginOutcome::MissingFields));
    }

    #[tokio::test]
    async fn test_login_vehicle_without_pin_is_rejected() {
        let (controller, pool) = setup().await;
        sqlx::query("UPDATE vehicles SET pin = NULL WHERE kennzeichen = 'TY-AV456'")
            .execute(&pool)
            .await
            .unwrap();

        let outcome = controller.login(login(Some("TY-AV456"), Some("5678"))).await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Rejected));
    }

    #[tokio::test]
    async fn test_km_stand_requires_fields_and_vehicle() {
        let (controller, _pool) = setup().await;

        let missing = controller
            .update_km_stand(UpdateKmStandRequest { fahrzeug_id: Some(1), km_stand: None })
            .await;
        assert!(matches!(missing, Err(AppError::Validation(_))));

        let absent = controller
            .update_km_stand(UpdateKmStandRequest { fahrzeug_id: Some(9999), km_stand: Some(10.0) })
            .await;
        assert!(matches!(absent, Err(AppError::NotFound(_))));

        controller
            .update_km_stand(UpdateKmStandRequest { fahrzeug_id: Some(1), km_stand: Some(10.0) })
            .await
            .unwrap();
    }
}
