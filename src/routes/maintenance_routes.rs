use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{MaintenanceResponse, ReportIssueRequest};
use crate::dto::trip_dto::HistoryFilters;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::ApiJson;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/", post(report_issue).get(list_maintenance))
}

async fn report_issue(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReportIssueRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceResponse>)> {
    let controller = MaintenanceController::new(state.repository.clone());
    let response = controller.report_issue(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Query(filters): Query<HistoryFilters>,
) -> AppResult<Json<Vec<MaintenanceResponse>>> {
    let controller = MaintenanceController::new(state.repository.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}
