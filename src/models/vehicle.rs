//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, que mapea exactamente a la
//! tabla `vehicles`. Las claves JSON son las que usan los clientes web
//! (camelCase en alemán); el PIN nunca se serializa.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub kennzeichen: String,
    pub hersteller: String,
    pub modell: String,

    pub fahrzeugklasse: Option<String>,
    pub typ: Option<String>,
    pub sitze: Option<i64>,
    pub fin: Option<String>,
    pub hsn: Option<String>,
    pub tsn: Option<String>,
    pub farbe: Option<String>,
    pub aufbau: Option<String>,
    pub tueren: Option<i64>,
    pub motorart: Option<String>,
    pub kraftstoffart: Option<String>,
    pub leergewicht: Option<i64>,
    pub zulaessiges_gesamtgewicht: Option<i64>,
    pub hubraum: Option<i64>,
    #[serde(rename = "leistungKW")]
    pub leistung_kw: Option<i64>,
    #[serde(rename = "leistungPS")]
    pub leistung_ps: Option<i64>,
    pub laenge: Option<f64>,
    pub breite: Option<f64>,
    pub baujahr: Option<i64>,
    pub anschaffungsjahr: Option<i64>,
    pub erstzulassung: Option<String>,
    pub zulassung_am: Option<String>,
    pub zulassungsart: Option<String>,

    pub aktueller_km_stand: Option<f64>,
    pub bemerkungen: Option<String>,
    pub bild_url: Option<String>,
    /// Hash bcrypt del PIN de login del conductor
    #[serde(skip_serializing)]
    pub pin: Option<String>,
    pub nutzer: Option<String>,
    pub einsatzort: Option<String>,

    pub leasing_ende: Option<String>,
    pub autohaus: Option<String>,
    pub kostentraeger: Option<String>,
    pub datum_anschaffung: Option<String>,
    pub vereinbarte_km: Option<f64>,

    pub hu_termin: Option<String>,
    pub au_termin: Option<String>,
    pub sp_termin: Option<String>,

    pub versicherungsgesellschaft: Option<String>,
    pub versicherungsnummer: Option<String>,
    pub versicherungsart: Option<String>,
    pub deckungssumme: Option<f64>,
    pub selbstbeteiligung_teilkasko: Option<f64>,
    pub selbstbeteiligung_vollkasko: Option<f64>,
    pub jahrespraemie: Option<f64>,
    pub vertragsbeginn: Option<String>,
    pub vertragsende: Option<String>,
    pub schadenfreiheitsklasse: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

