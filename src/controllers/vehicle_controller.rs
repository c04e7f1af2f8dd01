use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::info;

use crate::dto::vehicle_dto::{
    parse_vehicle_body, ColumnAssignment, FieldValue, UploadImageRequest, WriteMode, PIN_KEY,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::pin::hash_pin;
use crate::utils::validation::validate_image_data_uri;

pub struct VehicleController {
    repository: VehicleRepository,
    pin_hash_cost: u32,
}

impl VehicleController {
    pub fn new(pool: SqlitePool, pin_hash_cost: u32) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            pin_hash_cost,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fahrzeug"))
    }

    pub async fn create(&self, body: Value) -> AppResult<Vehicle> {
        let body = as_object(&body)?;
        let assignments = parse_vehicle_body(WriteMode::Create, body)?;
        let assignments = self.hash_pin_assignment(assignments)?;

        let vehicle = self.repository.create(assignments).await?;
        info!("🚗 Fahrzeug angelegt: {} (id {})", vehicle.kennzeichen, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: i64, body: Value) -> AppResult<Vehicle> {
        let body = as_object(&body)?;
        let assignments = parse_vehicle_body(WriteMode::Update, body)?;
        let assignments = self.hash_pin_assignment(assignments)?;

        self.repository
            .update(id, assignments)
            .await?
            .ok_or_else(|| not_found_error("Fahrzeug"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Fahrzeug"));
        }
        info!("🗑️ Fahrzeug {} gelöscht", id);
        Ok(())
    }

    pub async fn upload_image(&self, id: i64, request: UploadImageRequest) -> AppResult<Vehicle> {
        let image_data = request
            .image_data
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| validation_error("imageData", "Keine Bilddaten übermittelt"))?;

        validate_image_data_uri(&image_data).map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("imageData", e);
            AppError::Validation(errors)
        })?;

        self.repository
            .set_image(id, &image_data)
            .await?
            .ok_or_else(|| not_found_error("Fahrzeug"))
    }

    /// El PIN nunca llega en claro a la base de datos
    fn hash_pin_assignment(
        &self,
        assignments: Vec<ColumnAssignment>,
    ) -> AppResult<Vec<ColumnAssignment>> {
        assignments
            .into_iter()
            .map(|assignment| match assignment.value {
                Some(FieldValue::Text(pin)) if assignment.field.key == PIN_KEY => {
                    Ok(ColumnAssignment {
                        field: assignment.field,
                        value: Some(FieldValue::Text(hash_pin(&pin, self.pin_hash_cost)?)),
                    })
                }
                _ => Ok(assignment),
            })
            .collect()
    }
}

fn as_object(body: &Value) -> AppResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| AppError::BadRequest("Anfrage muss ein JSON-Objekt sein".to_string()))
}
