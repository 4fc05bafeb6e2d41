//! Modelo de Trip
//!
//! Un viaje es un hecho inmutable: se crea junto con la transición del
//! vehículo a "On Trip" y nunca se modifica.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub cargo_weight: Decimal,
    pub destination: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        cargo_weight: Decimal,
        destination: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            driver_id,
            cargo_weight,
            destination,
            created_at: Utc::now(),
        }
    }
}
