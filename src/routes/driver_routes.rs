use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::ApiJson;
use crate::utils::validation::validate_uuid;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver).get(list_drivers))
        .route("/:id", get(get_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<DriverResponse>)> {
    let controller = DriverController::new(state.repository.clone(), state.compliance_policy());
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    let controller = DriverController::new(state.repository.clone(), state.compliance_policy());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DriverResponse>> {
    let id = validate_uuid("id", &id)?;
    let controller = DriverController::new(state.repository.clone(), state.compliance_policy());
    let response = controller.get(id).await?;
    Ok(Json(response))
}
