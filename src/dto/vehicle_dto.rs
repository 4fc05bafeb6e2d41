use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus};

// Request para registrar un vehículo.
// `capacity` llega como JSON crudo para poder distinguir ausente / no numérico / <= 0.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,

    pub capacity: Option<Value>,
}

// Request para la corrección manual de estado
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleStatusRequest {
    pub status: Option<String>,
}

// Response de vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub license_plate: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub capacity: Decimal,
    pub status: VehicleStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            license_plate: vehicle.license_plate,
            capacity: vehicle.capacity,
            status: vehicle.status,
            version: vehicle.version,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
