//! DTOs de vehículo
//!
//! El catálogo `VEHICLE_FIELDS` es la lista blanca de campos escribibles:
//! clave JSON, columna SQL y tipo declarado. Alta, actualización parcial y
//! migración de columnas se basan en él.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Tipo declarado de una columna de `vehicles`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Text => "TEXT",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
        }
    }
}

/// Un campo escribible del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleField {
    pub key: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

const fn required(key: &'static str, column: &'static str) -> VehicleField {
    VehicleField { key, column, kind: ColumnKind::Text, required: true }
}

const fn text(key: &'static str, column: &'static str) -> VehicleField {
    VehicleField { key, column, kind: ColumnKind::Text, required: false }
}

const fn integer(key: &'static str, column: &'static str) -> VehicleField {
    VehicleField { key, column, kind: ColumnKind::Integer, required: false }
}

const fn real(key: &'static str, column: &'static str) -> VehicleField {
    VehicleField { key, column, kind: ColumnKind::Real, required: false }
}

pub const PIN_KEY: &str = "pin";

pub const VEHICLE_FIELDS: &[VehicleField] = &[
    required("kennzeichen", "kennzeichen"),
    required("hersteller", "hersteller"),
    required("modell", "modell"),
    // Stammdaten
    text("fahrzeugklasse", "fahrzeugklasse"),
    text("typ", "typ"),
    integer("sitze", "sitze"),
    text("fin", "fin"),
    text("hsn", "hsn"),
    text("tsn", "tsn"),
    text("farbe", "farbe"),
    text("aufbau", "aufbau"),
    integer("tueren", "tueren"),
    text("motorart", "motorart"),
    text("kraftstoffart", "kraftstoffart"),
    integer("leergewicht", "leergewicht"),
    integer("zulaessigesGesamtgewicht", "zulaessiges_gesamtgewicht"),
    integer("hubraum", "hubraum"),
    integer("leistungKW", "leistung_kw"),
    integer("leistungPS", "leistung_ps"),
    real("laenge", "laenge"),
    real("breite", "breite"),
    integer("baujahr", "baujahr"),
    integer("anschaffungsjahr", "anschaffungsjahr"),
    text("erstzulassung", "erstzulassung"),
    text("zulassungAm", "zulassung_am"),
    text("zulassungsart", "zulassungsart"),
    // Betrieb
    real("aktuellerKmStand", "aktueller_km_stand"),
    text("bemerkungen", "bemerkungen"),
    text("bildUrl", "bild_url"),
    text(PIN_KEY, "pin"),
    text("nutzer", "nutzer"),
    text("einsatzort", "einsatzort"),
    // Vertrag
    text("leasingEnde", "leasing_ende"),
    text("autohaus", "autohaus"),
    text("kostentraeger", "kostentraeger"),
    text("datumAnschaffung", "datum_anschaffung"),
    real("vereinbarteKm", "vereinbarte_km"),
    // Prüftermine
    text("huTermin", "hu_termin"),
    text("auTermin", "au_termin"),
    text("spTermin", "sp_termin"),
    // Versicherung
    text("versicherungsgesellschaft", "versicherungsgesellschaft"),
    text("versicherungsnummer", "versicherungsnummer"),
    text("versicherungsart", "versicherungsart"),
    real("deckungssumme", "deckungssumme"),
    real("selbstbeteiligungTeilkasko", "selbstbeteiligung_teilkasko"),
    real("selbstbeteiligungVollkasko", "selbstbeteiligung_vollkasko"),
    real("jahrespraemie", "jahrespraemie"),
    text("vertragsbeginn", "vertragsbeginn"),
    text("vertragsende", "vertragsende"),
    text("schadenfreiheitsklasse", "schadenfreiheitsklasse"),
];

/// Claves que el cliente reenvía pero nunca se escriben
pub const IGNORED_KEYS: &[&str] = &["id", "createdAt", "updatedAt"];

pub fn find_field(key: &str) -> Option<&'static VehicleField> {
    VEHICLE_FIELDS.iter().find(|f| f.key == key)
}

/// Modo de escritura: el alta omite vacíos, la actualización los anula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Los cuatro estados posibles de una clave en el cuerpo de la petición
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldInput<'a> {
    Absent,
    Null,
    Empty,
    Value(&'a Value),
}

impl<'a> FieldInput<'a> {
    pub fn from_body(body: &'a Map<String, Value>, key: &str) -> Self {
        match body.get(key) {
            None => FieldInput::Absent,
            Some(Value::Null) => FieldInput::Null,
            Some(Value::String(s)) if s.is_empty() => FieldInput::Empty,
            Some(value) => FieldInput::Value(value),
        }
    }
}

/// Valor ya convertido al tipo de la columna
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

/// Efecto de un campo sobre la fila
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// No tocar la columna (o, en el alta, dejar el valor por defecto NULL)
    Keep,
    /// Escribir NULL explícitamente
    Clear,
    Set(FieldValue),
}

/// Normalización compartida por alta y actualización.
///
/// | entrada        | Create | Update |
/// |----------------|--------|--------|
/// | ausente        | Keep   | Keep   |
/// | `null`         | Keep   | Clear  |
/// | `""`           | Keep   | Clear  |
/// | valor          | Set    | Set    |
///
/// El PIN nunca se devuelve al cliente, así que un formulario reenviado lo
/// trae como `""`: en la actualización eso lo conserva y sólo `null` lo borra.
pub fn normalize_field(
    mode: WriteMode,
    field: &VehicleField,
    input: FieldInput<'_>,
) -> AppResult<FieldChange> {
    match (mode, input) {
        (_, FieldInput::Absent) => Ok(FieldChange::Keep),
        (WriteMode::Create, FieldInput::Null | FieldInput::Empty) => Ok(FieldChange::Keep),
        (WriteMode::Update, FieldInput::Empty) if field.key == PIN_KEY => Ok(FieldChange::Keep),
        (WriteMode::Update, FieldInput::Null | FieldInput::Empty) => Ok(FieldChange::Clear),
        (_, FieldInput::Value(value)) => coerce_value(field, value).map(FieldChange::Set),
    }
}

/// Convertir un valor JSON al tipo declarado de la columna
pub fn coerce_value(field: &VehicleField, value: &Value) -> AppResult<FieldValue> {
    let invalid = |expected: &str| {
        validation_error(field.key, &format!("Feld '{}' erwartet {}", field.key, expected))
    };

    match (field.kind, value) {
        (ColumnKind::Text, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
        (ColumnKind::Text, Value::Number(n)) => Ok(FieldValue::Text(n.to_string())),
        (ColumnKind::Text, Value::Bool(b)) => Ok(FieldValue::Text(b.to_string())),
        (ColumnKind::Text, _) => Err(invalid("einen Text")),

        (ColumnKind::Integer, Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .map(FieldValue::Integer)
            .ok_or_else(|| invalid("eine ganze Zahl")),
        (ColumnKind::Integer, Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| parse_decimal(s).and_then(integral))
                .map(FieldValue::Integer)
                .ok_or_else(|| invalid("eine ganze Zahl"))
        }
        (ColumnKind::Integer, _) => Err(invalid("eine ganze Zahl")),

        (ColumnKind::Real, Value::Number(n)) => n
            .as_f64()
            .map(FieldValue::Real)
            .ok_or_else(|| invalid("eine Zahl")),
        (ColumnKind::Real, Value::String(s)) => parse_decimal(s.trim())
            .map(FieldValue::Real)
            .ok_or_else(|| invalid("eine Zahl")),
        (ColumnKind::Real, _) => Err(invalid("eine Zahl")),
    }
}

/// Acepta tanto `4.75` como la notación alemana `4,75`
fn parse_decimal(s: &str) -> Option<f64> {
    s.replace(',', ".").parse::<f64>().ok().filter(|f| f.is_finite())
}

fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Asignación de columna resultante: `None` significa NULL
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    pub field: &'static VehicleField,
    pub value: Option<FieldValue>,
}

/// Validar y normalizar el cuerpo completo de un alta o actualización.
///
/// Rechaza claves desconocidas, exige los campos obligatorios en el alta y
/// prohíbe vaciarlos en la actualización.
pub fn parse_vehicle_body(
    mode: WriteMode,
    body: &Map<String, Value>,
) -> AppResult<Vec<ColumnAssignment>> {
    let mut unknown: Vec<&str> = body
        .keys()
        .map(String::as_str)
        .filter(|k| find_field(k).is_none() && !IGNORED_KEYS.contains(k))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        return Err(AppError::BadRequest(format!(
            "Unbekannte Felder: {}",
            unknown.join(", ")
        )));
    }

    let mut assignments = Vec::new();
    for field in VEHICLE_FIELDS {
        let mut change = normalize_field(mode, field, FieldInput::from_body(body, field.key))?;

        if field.required {
            // Kennzeichen, Hersteller und Modell se guardan sin espacios sobrantes
            if let FieldChange::Set(FieldValue::Text(s)) = &mut change {
                *s = s.trim().to_string();
            }
            let blank = match &change {
                FieldChange::Set(FieldValue::Text(s)) => s.is_empty(),
                FieldChange::Clear => true,
                FieldChange::Keep => mode == WriteMode::Create,
                FieldChange::Set(_) => false,
            };
            if blank {
                return Err(validation_error(
                    field.key,
                    "Kennzeichen, Hersteller und Modell sind Pflichtfelder",
                ));
            }
        }

        match change {
            FieldChange::Keep => {}
            FieldChange::Clear => assignments.push(ColumnAssignment { field, value: None }),
            FieldChange::Set(value) => assignments.push(ColumnAssignment {
                field,
                value: Some(value),
            }),
        }
    }

    Ok(assignments)
}

/// Request para adjuntar una imagen (data URI)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    pub image_data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn nutzer() -> &'static VehicleField {
        find_field("nutzer").unwrap()
    }

    #[test]
    fn test_normalize_create_omits_absent_null_and_empty() {
        let field = nutzer();
        let value = json!("Meier");
        assert_eq!(normalize_field(WriteMode::Create, field, FieldInput::Absent).unwrap(), FieldChange::Keep);
        assert_eq!(normalize_field(WriteMode::Create, field, FieldInput::Null).unwrap(), FieldChange::Keep);
        assert_eq!(normalize_field(WriteMode::Create, field, FieldInput::Empty).unwrap(), FieldChange::Keep);
        assert_eq!(
            normalize_field(WriteMode::Create, field, FieldInput::Value(&value)).unwrap(),
            FieldChange::Set(FieldValue::Text("Meier".to_string()))
        );
    }

    #[test]
    fn test_normalize_update_clears_null_and_empty() {
        let field = nutzer();
        let value = json!("Meier");
        assert_eq!(normalize_field(WriteMode::Update, field, FieldInput::Absent).unwrap(), FieldChange::Keep);
        assert_eq!(normalize_field(WriteMode::Update, field, FieldInput::Null).unwrap(), FieldChange::Clear);
        assert_eq!(normalize_field(WriteMode::Update, field, FieldInput::Empty).unwrap(), FieldChange::Clear);
        assert_eq!(
            normalize_field(WriteMode::Update, field, FieldInput::Value(&value)).unwrap(),
            FieldChange::Set(FieldValue::Text("Meier".to_string()))
        );
    }

    #[test]
    fn test_normalize_update_keeps_pin_on_empty_string() {
        let pin = find_field(PIN_KEY).unwrap();
        assert_eq!(normalize_field(WriteMode::Update, pin, FieldInput::Empty).unwrap(), FieldChange::Keep);
        assert_eq!(normalize_field(WriteMode::Update, pin, FieldInput::Null).unwrap(), FieldChange::Clear);
        assert_eq!(normalize_field(WriteMode::Create, pin, FieldInput::Empty).unwrap(), FieldChange::Keep);
    }

    #[test]
    fn test_parse_update_form_resubmission_keeps_pin() {
        let b = body(json!({"kennzeichen": "FZ-PLUS", "nutzer": "Schulz", "pin": ""}));
        let assignments = parse_vehicle_body(WriteMode::Update, &b).unwrap();
        assert!(assignments.iter().all(|a| a.field.key != PIN_KEY));
    }

    #[test]
    fn test_parse_trims_required_fields() {
        let b = body(json!({"kennzeichen": "  FZ-X 1 ", "hersteller": "Opel ", "modell": "Astra", "nutzer": " Meier "}));
        let assignments = parse_vehicle_body(WriteMode::Create, &b).unwrap();
        let value_of = |key: &str| {
            assignments
                .iter()
                .find(|a| a.field.key == key)
                .and_then(|a| a.value.clone())
        };
        assert_eq!(value_of("kennzeichen"), Some(FieldValue::Text("FZ-X 1".to_string())));
        assert_eq!(value_of("hersteller"), Some(FieldValue::Text("Opel".to_string())));
        assert_eq!(value_of("nutzer"), Some(FieldValue::Text(" Meier ".to_string())));
    }

    #[test]
    fn test_field_input_from_body() {
        let b = body(json!({"a": null, "b": "", "c": 0}));
        assert_eq!(FieldInput::from_body(&b, "a"), FieldInput::Null);
        assert_eq!(FieldInput::from_body(&b, "b"), FieldInput::Empty);
        assert!(matches!(FieldInput::from_body(&b, "c"), FieldInput::Value(_)));
        assert_eq!(FieldInput::from_body(&b, "d"), FieldInput::Absent);
    }

    #[test]
    fn test_coerce_numeric_columns() {
        let sitze = find_field("sitze").unwrap();
        let laenge = find_field("laenge").unwrap();
        assert_eq!(coerce_value(sitze, &json!(5)).unwrap(), FieldValue::Integer(5));
        assert_eq!(coerce_value(sitze, &json!("7")).unwrap(), FieldValue::Integer(7));
        assert_eq!(coerce_value(sitze, &json!(5.0)).unwrap(), FieldValue::Integer(5));
        assert!(coerce_value(sitze, &json!(5.5)).is_err());
        assert!(coerce_value(sitze, &json!("fünf")).is_err());
        assert_eq!(coerce_value(laenge, &json!(4.75)).unwrap(), FieldValue::Real(4.75));
        assert_eq!(coerce_value(laenge, &json!("4,75")).unwrap(), FieldValue::Real(4.75));
        assert!(coerce_value(laenge, &json!([1, 2])).is_err());
    }

    #[test]
    fn test_coerce_text_accepts_numbers() {
        let pin = find_field(PIN_KEY).unwrap();
        assert_eq!(coerce_value(pin, &json!(1234)).unwrap(), FieldValue::Text("1234".to_string()));
        assert!(coerce_value(pin, &json!({"x": 1})).is_err());
    }

    #[test]
    fn test_parse_create_requires_identifier_make_model() {
        let missing_model = body(json!({"kennzeichen": "FZ-TEST", "hersteller": "X"}));
        assert!(matches!(
            parse_vehicle_body(WriteMode::Create, &missing_model),
            Err(AppError::Validation(_))
        ));

        let blank_make = body(json!({"kennzeichen": "FZ-TEST", "hersteller": "  ", "modell": "Y"}));
        assert!(parse_vehicle_body(WriteMode::Create, &blank_make).is_err());

        let ok = body(json!({"kennzeichen": "FZ-TEST", "hersteller": "X", "modell": "Y", "farbe": ""}));
        let assignments = parse_vehicle_body(WriteMode::Create, &ok).unwrap();
        assert_eq!(assignments.len(), 3);
    }

    #[test]
    fn test_parse_update_rejects_unknown_keys() {
        let b = body(json!({"nutzer": "Meier", "rolle": "admin", "geheim": 1}));
        match parse_vehicle_body(WriteMode::Update, &b) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Unbekannte Felder: geheim, rolle"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_update_ignores_bookkeeping_keys() {
        let b = body(json!({"id": 3, "createdAt": "x", "updatedAt": "y", "nutzer": ""}));
        let assignments = parse_vehicle_body(WriteMode::Update, &b).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].field.column, "nutzer");
        assert_eq!(assignments[0].value, None);
    }

    #[test]
    fn test_parse_update_cannot_clear_required_field() {
        let b = body(json!({"modell": ""}));
        assert!(matches!(
            parse_vehicle_body(WriteMode::Update, &b),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_catalogue_keys_and_columns_are_unique() {
        let mut keys: Vec<_> = VEHICLE_FIELDS.iter().map(|f| f.key).collect();
        let mut columns: Vec<_> = VEHICLE_FIELDS.iter().map(|f| f.column).collect();
        keys.sort_unstable();
        keys.dedup();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(keys.len(), VEHICLE_FIELDS.len());
        assert_eq!(columns.len(), VEHICLE_FIELDS.len());
    }
}
