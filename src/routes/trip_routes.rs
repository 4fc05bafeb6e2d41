use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{DispatchTripRequest, HistoryFilters, TripResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::ApiJson;

pub fn create_trip_router() -> Router<AppState> {
    Router::new().route("/", post(dispatch_trip).get(list_trips))
}

fn controller(state: &AppState) -> TripController {
    TripController::new(
        state.repository.clone(),
        state.compliance_policy(),
        state.config.enforce_available_dispatch,
    )
}

async fn dispatch_trip(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DispatchTripRequest>,
) -> AppResult<(StatusCode, Json<TripResponse>)> {
    let response = controller(&state).dispatch(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(filters): Query<HistoryFilters>,
) -> AppResult<Json<Vec<TripResponse>>> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}
