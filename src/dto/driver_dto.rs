//! DTOs de la app de conductores
//!
//! Todos los campos son `Option` para que la ausencia de un campo
//! obligatorio se responda con un 400 propio en lugar del rechazo genérico
//! del extractor JSON.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::report::{
    IncidentCategory, IncidentSeverity, IncidentStatus, MaintenanceStatus, MaintenanceUrgency,
};
use crate::models::vehicle::Vehicle;

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub kennzeichen: Option<String>,
    pub pin: Option<String>,
}

impl LoginRequest {
    /// Kennzeichen y PIN, si ambos vienen informados
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let kennzeichen = self.kennzeichen.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let pin = self.pin.as_deref().filter(|s| !s.is_empty())?;
        Some((kennzeichen, pin))
    }
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fahrzeug: Option<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn success(fahrzeug: Vehicle) -> Self {
        Self {
            success: true,
            fahrzeug: Some(fahrzeug),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            fahrzeug: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKmStandRequest {
    pub fahrzeug_id: Option<i64>,
    #[validate(range(min = 0.0, message = "KM-Stand darf nicht negativ sein"))]
    pub km_stand: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentReportRequest {
    pub fahrzeug_id: Option<i64>,
    #[validate(range(min = 0.0, message = "KM-Stand darf nicht negativ sein"))]
    pub km_stand: Option<f64>,
    pub beschreibung: Option<String>,
    pub schadensart: Option<IncidentCategory>,
    pub schweregrad: Option<IncidentSeverity>,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceReportRequest {
    pub fahrzeug_id: Option<i64>,
    #[validate(range(min = 0.0, message = "KM-Stand darf nicht negativ sein"))]
    pub km_stand: Option<f64>,
    pub beschreibung: Option<String>,
    pub dringlichkeit: Option<MaintenanceUrgency>,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
}

/// Meldung ya validada, lista para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncidentReport {
    pub fahrzeug_id: i64,
    pub km_stand: f64,
    pub beschreibung: String,
    pub schadensart: IncidentCategory,
    pub schweregrad: IncidentSeverity,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceReport {
    pub fahrzeug_id: i64,
    pub km_stand: f64,
    pub beschreibung: String,
    pub dringlichkeit: MaintenanceUrgency,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
}

impl CreateIncidentReportRequest {
    /// `None` si falta algún campo obligatorio
    pub fn into_new(self) -> Option<NewIncidentReport> {
        Some(NewIncidentReport {
            fahrzeug_id: self.fahrzeug_id?,
            km_stand: self.km_stand?,
            beschreibung: non_empty(self.beschreibung)?,
            schadensart: self.schadensart?,
            schweregrad: self.schweregrad?,
            melder: non_empty(self.melder),
            bemerkungen: non_empty(self.bemerkungen),
        })
    }
}

impl CreateMaintenanceReportRequest {
    pub fn into_new(self) -> Option<NewMaintenanceReport> {
        Some(NewMaintenanceReport {
            fahrzeug_id: self.fahrzeug_id?,
            km_stand: self.km_stand?,
            beschreibung: non_empty(self.beschreibung)?,
            dringlichkeit: self.dringlichkeit?,
            melder: non_empty(self.melder),
            bemerkungen: non_empty(self.bemerkungen),
        })
    }
}

/// Texto vacío o sólo espacios cuenta como ausente
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub struct UpdateIncidentStatusRequest {
    pub status: IncidentStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMaintenanceStatusRequest {
    pub status: MaintenanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_credentials_require_both_fields() {
        let full: LoginRequest =
            serde_json::from_value(json!({"kennzeichen": " FZ-PLUS ", "pin": "1234"})).unwrap();
        assert_eq!(full.credentials(), Some(("FZ-PLUS", "1234")));

        let no_pin: LoginRequest = serde_json::from_value(json!({"kennzeichen": "FZ-PLUS"})).unwrap();
        assert_eq!(no_pin.credentials(), None);

        let empty: LoginRequest =
            serde_json::from_value(json!({"kennzeichen": "", "pin": "1234"})).unwrap();
        assert_eq!(empty.credentials(), None);
    }

    #[test]
    fn test_incident_request_into_new() {
        let request: CreateIncidentReportRequest = serde_json::from_value(json!({
            "fahrzeugId": 1,
            "kmStand": 0,
            "beschreibung": "Delle hinten links",
            "schadensart": "Delle",
            "schweregrad": "Leicht",
            "melder": ""
        }))
        .unwrap();

        let report = request.into_new().unwrap();
        assert_eq!(report.km_stand, 0.0);
        assert_eq!(report.schadensart, IncidentCategory::Dent);
        assert_eq!(report.melder, None);
    }

    #[test]
    fn test_maintenance_request_missing_urgency() {
        let request: CreateMaintenanceReportRequest = serde_json::from_value(json!({
            "fahrzeugId": 1,
            "kmStand": 100.5,
            "beschreibung": "Bremsen quietschen"
        }))
        .unwrap();
        assert!(request.into_new().is_none());
    }

    #[test]
    fn test_negative_km_stand_fails_validation() {
        let request: UpdateKmStandRequest =
            serde_json::from_value(json!({"fahrzeugId": 1, "kmStand": -5})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_response_omits_empty_fields() {
        let body = serde_json::to_value(LoginResponse::error("Ungültiges Kennzeichen oder PIN")).unwrap();
        assert_eq!(body["success"], false);
        assert!(body.get("fahrzeug").is_none());
    }
}
