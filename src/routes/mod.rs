//! Rutas HTTP
//!
//! Un sub-router por recurso; `create_app_router` los monta todos con CORS
//! compresión y trazas de peticiones.

pub mod driver_routes;
pub mod maintenance_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(root_endpoint))
        .route("/health", get(health_endpoint))
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/trips", trip_routes::create_trip_router())
        .nest("/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

async fn root_endpoint() -> &'static str {
    "FleetFlow backend running"
}

/// Endpoint de salud simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleetflow",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
