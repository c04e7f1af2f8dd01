//! Datos de ejemplo
//!
//! Si la tabla `vehicles` está vacía se insertan los dos vehículos de
//! demostración, con sus PIN de login ya convertidos a hash.

use tracing::info;

use crate::database::schema::SchemaManager;
use crate::utils::errors::AppResult;
use crate::utils::pin::hash_pin;

struct DemoVehicle {
    kennzeichen: &'static str,
    hersteller: &'static str,
    modell: &'static str,
    fahrzeugklasse: &'static str,
    typ: &'static str,
    sitze: i64,
    fin: &'static str,
    hsn: &'static str,
    tsn: &'static str,
    farbe: &'static str,
    aufbau: &'static str,
    tueren: i64,
    motorart: &'static str,
    kraftstoffart: &'static str,
    leergewicht: i64,
    zulaessiges_gesamtgewicht: i64,
    hubraum: i64,
    leistung_kw: i64,
    leistung_ps: i64,
    laenge: f64,
    breite: f64,
    baujahr: i64,
    anschaffungsjahr: i64,
    erstzulassung: &'static str,
    zulassung_am: &'static str,
    zulassungsart: &'static str,
    aktueller_km_stand: f64,
    bemerkungen: &'static str,
    pin: &'static str,
}

const DEMO_VEHICLES: [DemoVehicle; 2] = [
    DemoVehicle {
        kennzeichen: "FZ-PLUS",
        hersteller: "Ford",
        modell: "Mondeo",
        fahrzeugklasse: "Obere Mittelklasse",
        typ: "Stufenheck",
        sitze: 5,
        fin: "00000000000000000X",
        hsn: "0001",
        tsn: "123",
        farbe: "Silber-Metallic",
        aufbau: "Stufenheck",
        tueren: 5,
        motorart: "Otto",
        kraftstoffart: "Euro 4",
        leergewicht: 1500,
        zulaessiges_gesamtgewicht: 2500,
        hubraum: 1796,
        leistung_kw: 85,
        leistung_ps: 115,
        laenge: 4.75,
        breite: 1.85,
        baujahr: 1997,
        anschaffungsjahr: 2001,
        erstzulassung: "2001-04-12",
        zulassung_am: "2001-04-12",
        zulassungsart: "Zulassung eines Gebrauchtfahrzeugs",
        aktueller_km_stand: 25436.2,
        bemerkungen: "Beispielfahrzeug aus der Dokumentation",
        pin: "1234",
    },
    DemoVehicle {
        kennzeichen: "TY-AV456",
        hersteller: "Toyota",
        modell: "Avensis Verso",
        fahrzeugklasse: "Mittelklasse",
        typ: "Van",
        sitze: 7,
        fin: "12345678901234567",
        hsn: "1234",
        tsn: "567",
        farbe: "Blau-Metallic",
        aufbau: "Van",
        tueren: 5,
        motorart: "Diesel",
        kraftstoffart: "Euro 5",
        leergewicht: 1650,
        zulaessiges_gesamtgewicht: 2400,
        hubraum: 1995,
        leistung_kw: 93,
        leistung_ps: 126,
        laenge: 4.56,
        breite: 1.75,
        baujahr: 2005,
        anschaffungsjahr: 2006,
        erstzulassung: "2006-03-15",
        zulassung_am: "2006-03-15",
        zulassungsart: "Erstzulassung",
        aktueller_km_stand: 87500.0,
        bemerkungen: "Firmenwagen für größere Fahrten",
        pin: "5678",
    },
];

impl SchemaManager {
    /// Insertar los vehículos de ejemplo si no hay ninguno. Devuelve cuántos se insertaron.
    pub async fn seed(&self) -> AppResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            info!("ℹ️ La base de datos ya contiene vehículos, se omite el seed");
            return Ok(0);
        }

        for demo in &DEMO_VEHICLES {
            let pin_hash = hash_pin(demo.pin, self.pin_hash_cost)?;
            sqlx::query(
                r#"
                INSERT INTO vehicles (
                    kennzeichen, hersteller, modell, fahrzeugklasse, typ, sitze,
                    fin, hsn, tsn, farbe, aufbau, tueren, motorart, kraftstoffart,
                    leergewicht, zulaessiges_gesamtgewicht, hubraum, leistung_kw, leistung_ps,
                    laenge, breite, baujahr, anschaffungsjahr, erstzulassung, zulassung_am,
                    zulassungsart, aktueller_km_stand, bemerkungen, pin
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(demo.kennzeichen)
            .bind(demo.hersteller)
            .bind(demo.modell)
            .bind(demo.fahrzeugklasse)
            .bind(demo.typ)
            .bind(demo.sitze)
            .bind(demo.fin)
            .bind(demo.hsn)
            .bind(demo.tsn)
            .bind(demo.farbe)
            .bind(demo.aufbau)
            .bind(demo.tueren)
            .bind(demo.motorart)
            .bind(demo.kraftstoffart)
            .bind(demo.leergewicht)
            .bind(demo.zulaessiges_gesamtgewicht)
            .bind(demo.hubraum)
            .bind(demo.leistung_kw)
            .bind(demo.leistung_ps)
            .bind(demo.laenge)
            .bind(demo.breite)
            .bind(demo.baujahr)
            .bind(demo.anschaffungsjahr)
            .bind(demo.erstzulassung)
            .bind(demo.zulassung_am)
            .bind(demo.zulassungsart)
            .bind(demo.aktueller_km_stand)
            .bind(demo.bemerkungen)
            .bind(pin_hash)
            .execute(&self.pool)
            .await?;
        }

        info!("✅ Datos de ejemplo insertados");
        Ok(DEMO_VEHICLES.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DatabaseConfig;
    use crate::database::schema::SchemaManager;
    use crate::utils::pin::verify_pin;

    #[tokio::test]
    async fn test_seed_only_runs_on_empty_table() {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        let manager = SchemaManager::new(pool.clone(), crate::config::MIN_PIN_HASH_COST);
        manager.ensure_schema().await.unwrap();

        assert_eq!(manager.seed().await.unwrap(), 2);
        assert_eq!(manager.seed().await.unwrap(), 0);

        let pin: String = sqlx::query_scalar("SELECT pin FROM vehicles WHERE kennzeichen = 'FZ-PLUS'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_ne!(pin, "1234");
        assert!(verify_pin("1234", &pin));
    }
}
