use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

use crate::database::schema::NOW_SQL;
use crate::dto::vehicle_dto::{ColumnAssignment, FieldValue};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

const DUPLICATE_PLATE: &str = "Kennzeichen existiert bereits";
const VEHICLE_NOT_FOUND: &str = "Fahrzeug nicht gefunden";

type VehicleQuery<'q> = QueryAs<'q, Sqlite, Vehicle, SqliteArguments<'q>>;

/// Enlazar un valor ya convertido; `None` se escribe como NULL
fn bind_value(query: VehicleQuery<'_>, value: Option<FieldValue>) -> VehicleQuery<'_> {
    match value {
        Some(FieldValue::Text(s)) => query.bind(s),
        Some(FieldValue::Integer(i)) => query.bind(i),
        Some(FieldValue::Real(f)) => query.bind(f),
        None => query.bind(None::<String>),
    }
}

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY kennzeichen ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_kennzeichen(&self, kennzeichen: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE kennzeichen = ?")
            .bind(kennzeichen)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Insertar sólo las columnas informadas; el resto queda a NULL
    pub async fn create(&self, assignments: Vec<ColumnAssignment>) -> AppResult<Vehicle> {
        let columns: Vec<&str> = assignments.iter().map(|a| a.field.column).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO vehicles ({}) VALUES ({}) RETURNING *",
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query_as::<_, Vehicle>(&sql);
        for assignment in assignments {
            query = bind_value(query, assignment.value);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, DUPLICATE_PLATE, VEHICLE_NOT_FOUND))
    }

    /// Actualización parcial. Devuelve `None` si el vehículo no existe.
    pub async fn update(
        &self,
        id: i64,
        assignments: Vec<ColumnAssignment>,
    ) -> AppResult<Option<Vehicle>> {
        let mut sets: Vec<String> = assignments
            .iter()
            .map(|a| format!("{} = ?", a.field.column))
            .collect();
        sets.push(format!("updated_at = {}", NOW_SQL));
        let sql = format!(
            "UPDATE vehicles SET {} WHERE id = ? RETURNING *",
            sets.join(", ")
        );

        let mut query = sqlx::query_as::<_, Vehicle>(&sql);
        for assignment in assignments {
            query = bind_value(query, assignment.value);
        }

        query
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, DUPLICATE_PLATE, VEHICLE_NOT_FOUND))
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sobrescribir el kilometraje sin comprobar que aumente
    pub async fn update_km_stand(&self, id: i64, km_stand: f64) -> AppResult<bool> {
        let sql = format!(
            "UPDATE vehicles SET aktueller_km_stand = ?, updated_at = {} WHERE id = ?",
            NOW_SQL
        );
        let result = sqlx::query(&sql)
            .bind(km_stand)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_image(&self, id: i64, image_data: &str) -> AppResult<Option<Vehicle>> {
        let sql = format!(
            "UPDATE vehicles SET bild_url = ?, updated_at = {} WHERE id = ? RETURNING *",
            NOW_SQL
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(image_data)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }
}
