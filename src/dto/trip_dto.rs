use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::Trip;

// Request de despacho
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DispatchTripRequest {
    pub vehicle_id: Option<String>,
    pub cargo_weight: Option<Value>,
    pub driver_id: Option<String>,
    #[validate(length(max = 200))]
    pub destination: Option<String>,
}

// Filtro opcional por vehículo para los listados de historial
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilters {
    pub vehicle_id: Option<String>,
}

// Response de viaje
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cargo_weight: Decimal,
    pub destination: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            vehicle_id: trip.vehicle_id,
            driver_id: trip.driver_id,
            cargo_weight: trip.cargo_weight,
            destination: trip.destination,
            created_at: trip.created_at,
        }
    }
}
