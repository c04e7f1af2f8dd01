use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::driver_controller::{
    DriverController, LoginOutcome, LOGIN_FIELDS_MISSING, LOGIN_REJECTED,
};
use crate::dto::driver_dto::{
    CreateIncidentReportRequest, CreateMaintenanceReportRequest, LoginRequest, LoginResponse,
    UpdateIncidentStatusRequest, UpdateKmStandRequest, UpdateMaintenanceStatusRequest,
};
use crate::models::report::{IncidentReport, MaintenanceReport};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath};

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/km-stand", post(update_km_stand))
        .route("/schaden", get(list_all_incidents).post(create_incident))
        .route("/schaden/:id", get(list_incidents))
        .route("/schaden/:id/status", patch(update_incident_status))
        .route("/wartung", get(list_all_maintenance).post(create_maintenance))
        .route("/wartung/:id", get(list_maintenance))
        .route("/wartung/:id/status", patch(update_maintenance_status))
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.pool.clone())
}

/// El login responde siempre con `{success, ...}`, también en los fallos
async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    let response = match controller(&state).login(request).await? {
        LoginOutcome::Accepted(vehicle) => {
            (StatusCode::OK, Json(LoginResponse::success(vehicle))).into_response()
        }
        LoginOutcome::MissingFields => (
            StatusCode::BAD_REQUEST,
            Json(LoginResponse::error(LOGIN_FIELDS_MISSING)),
        )
            .into_response(),
        LoginOutcome::Rejected => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse::error(LOGIN_REJECTED)),
        )
            .into_response(),
    };
    Ok(response)
}

async fn update_km_stand(
    State(state): State<AppState>,
    AppJson(request): AppJson<UpdateKmStandRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).update_km_stand(request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Kilometerstand aktualisiert"
    })))
}

async fn create_incident(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateIncidentReportRequest>,
) -> Result<(StatusCode, Json<IncidentReport>), AppError> {
    let report = controller(&state).create_incident(request).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn create_maintenance(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateMaintenanceReportRequest>,
) -> Result<(StatusCode, Json<MaintenanceReport>), AppError> {
    let report = controller(&state).create_maintenance(request).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// `id` es el vehículo
async fn list_incidents(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<IncidentReport>>, AppError> {
    Ok(Json(controller(&state).incidents_for_vehicle(id).await?))
}

async fn list_maintenance(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<MaintenanceReport>>, AppError> {
    Ok(Json(controller(&state).maintenance_for_vehicle(id).await?))
}

async fn list_all_incidents(
    State(state): State<AppState>,
) -> Result<Json<Vec<IncidentReport>>, AppError> {
    Ok(Json(controller(&state).all_incidents().await?))
}

async fn list_all_maintenance(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceReport>>, AppError> {
    Ok(Json(controller(&state).all_maintenance().await?))
}

/// `id` es la meldung
async fn update_incident_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateIncidentStatusRequest>,
) -> Result<Json<IncidentReport>, AppError> {
    Ok(Json(controller(&state).update_incident_status(id, request).await?))
}

async fn update_maintenance_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateMaintenanceStatusRequest>,
) -> Result<Json<MaintenanceReport>, AppError> {
    Ok(Json(controller(&state).update_maintenance_status(id, request).await?))
}
