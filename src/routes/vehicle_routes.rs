use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::UploadImageRequest;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/upload-image", post(upload_image))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.pool.clone(), state.config.pin_hash_cost)
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = controller(&state).list().await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = controller(&state).get_by_id(id).await?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = controller(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = controller(&state).update(id, body).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    controller(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UploadImageRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = controller(&state).upload_image(id, request).await?;
    Ok(Json(vehicle))
}
