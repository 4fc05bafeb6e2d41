use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleStatusRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::ApiJson;
use crate::utils::validation::validate_uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route("/:id", get(get_vehicle).put(update_vehicle_status))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<VehicleResponse>)> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<VehicleResponse>>> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VehicleResponse>> {
    let id = validate_uuid("id", &id)?;
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateVehicleStatusRequest>,
) -> AppResult<Json<VehicleResponse>> {
    let id = validate_uuid("id", &id)?;
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.set_status(id, request).await?;
    Ok(Json(response))
}
