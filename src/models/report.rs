//! Modelos de meldungen de conductores
//!
//! Schadensmeldungen (`incident_reports`) y Wartungsmeldungen
//! (`maintenance_requests`). Los enums usan nombres de variante en inglés
//! y se guardan/serializan con los valores alemanes que envían los clientes;
//! las restricciones CHECK de la tabla aceptan exactamente esos valores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Tipo de daño - mapea a la columna schadensart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
pub enum IncidentCategory {
    #[serde(rename = "Unfall")]
    #[sqlx(rename = "Unfall")]
    Accident,
    #[serde(rename = "Kratzer")]
    #[sqlx(rename = "Kratzer")]
    Scratch,
    #[serde(rename = "Delle")]
    #[sqlx(rename = "Delle")]
    Dent,
    #[serde(rename = "Technisch")]
    #[sqlx(rename = "Technisch")]
    Technical,
    #[serde(rename = "Sonstiges")]
    #[sqlx(rename = "Sonstiges")]
    Other,
}

/// Gravedad del daño - mapea a la columna schweregrad
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
pub enum IncidentSeverity {
    #[serde(rename = "Leicht")]
    #[sqlx(rename = "Leicht")]
    Light,
    #[serde(rename = "Mittel")]
    #[sqlx(rename = "Mittel")]
    Medium,
    #[serde(rename = "Schwer")]
    #[sqlx(rename = "Schwer")]
    Severe,
}

/// Estado de una Schadensmeldung
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
pub enum IncidentStatus {
    #[default]
    #[serde(rename = "Gemeldet")]
    #[sqlx(rename = "Gemeldet")]
    Reported,
    #[serde(rename = "In Bearbeitung")]
    #[sqlx(rename = "In Bearbeitung")]
    InProgress,
    #[serde(rename = "Repariert")]
    #[sqlx(rename = "Repariert")]
    Repaired,
    #[serde(rename = "Abgeschlossen")]
    #[sqlx(rename = "Abgeschlossen")]
    Closed,
}

/// Urgencia de una Wartungsmeldung
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
pub enum MaintenanceUrgency {
    #[serde(rename = "Niedrig")]
    #[sqlx(rename = "Niedrig")]
    Low,
    #[serde(rename = "Mittel")]
    #[sqlx(rename = "Mittel")]
    Medium,
    #[serde(rename = "Hoch")]
    #[sqlx(rename = "Hoch")]
    High,
    #[serde(rename = "Sofort")]
    #[sqlx(rename = "Sofort")]
    Immediate,
}

/// Estado de una Wartungsmeldung
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
pub enum MaintenanceStatus {
    #[default]
    #[serde(rename = "Gemeldet")]
    #[sqlx(rename = "Gemeldet")]
    Reported,
    #[serde(rename = "Bestätigt")]
    #[sqlx(rename = "Bestätigt")]
    Confirmed,
    #[serde(rename = "Geplant")]
    #[sqlx(rename = "Geplant")]
    Scheduled,
    #[serde(rename = "Erledigt")]
    #[sqlx(rename = "Erledigt")]
    Done,
}

/// Schadensmeldung - mapea a la tabla incident_reports
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub id: i64,
    pub fahrzeug_id: i64,
    pub datum: DateTime<Utc>,
    pub km_stand: f64,
    pub beschreibung: String,
    pub schadensart: IncidentCategory,
    pub schweregrad: IncidentSeverity,
    pub status: IncidentStatus,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wartungsmeldung - mapea a la tabla maintenance_requests
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub id: i64,
    pub fahrzeug_id: i64,
    pub datum: DateTime<Utc>,
    pub km_stand: f64,
    pub beschreibung: String,
    pub dringlichkeit: MaintenanceUrgency,
    pub status: MaintenanceStatus,
    pub melder: Option<String>,
    pub bemerkungen: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enums_use_german_wire_values() {
        assert_eq!(json!(IncidentCategory::Technical), json!("Technisch"));
        assert_eq!(json!(IncidentStatus::InProgress), json!("In Bearbeitung"));
        assert_eq!(json!(MaintenanceStatus::Confirmed), json!("Bestätigt"));
        let urgency: MaintenanceUrgency = serde_json::from_value(json!("Sofort")).unwrap();
        assert_eq!(urgency, MaintenanceUrgency::Immediate);
        assert!(serde_json::from_value::<IncidentSeverity>(json!("Severe")).is_err());
    }

    #[test]
    fn test_status_defaults_to_reported() {
        assert_eq!(IncidentStatus::default(), IncidentStatus::Reported);
        assert_eq!(MaintenanceStatus::default(), MaintenanceStatus::Reported);
    }
}
