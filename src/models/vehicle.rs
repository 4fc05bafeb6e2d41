//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su estado operativo.
//! Mapea exactamente a la tabla `vehicles` del schema PostgreSQL.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
///
/// Exactamente uno de los tres estados se cumple en todo momento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    #[serde(rename = "On Trip", alias = "OnTrip")]
    OnTrip,
    #[serde(rename = "In Shop", alias = "InShop")]
    InShop,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::OnTrip,
        VehicleStatus::InShop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::OnTrip => "On Trip",
            VehicleStatus::InShop => "In Shop",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valor de estado desconocido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVehicleStatus(pub String);

impl fmt::Display for UnknownVehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid vehicle status '{}', expected one of: Available, On Trip, In Shop",
            self.0
        )
    }
}

impl FromStr for VehicleStatus {
    type Err = UnknownVehicleStatus;

    /// Acepta "On Trip", "OnTrip", "on_trip", "in-shop"... sin distinguir mayúsculas
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "available" => Ok(VehicleStatus::Available),
            "ontrip" => Ok(VehicleStatus::OnTrip),
            "inshop" => Ok(VehicleStatus::InShop),
            _ => Err(UnknownVehicleStatus(value.to_string())),
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub license_plate: Option<String>,
    pub capacity: Decimal,
    pub status: VehicleStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nuevo vehículo recién registrado: siempre arranca disponible
    pub fn register(name: String, license_plate: Option<String>, capacity: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            license_plate,
            capacity,
            status: VehicleStatus::Available,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// El límite de capacidad es inclusivo
    pub fn can_carry(&self, cargo_weight: Decimal) -> bool {
        cargo_weight <= self.capacity
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// Aplica un cambio de estado ya autorizado y avanza la versión
    pub fn transition_to(&mut self, status: VehicleStatus) {
        self.status = status;
        self.version += 1;
        self.updated_at = Utc::now();
    }
}
