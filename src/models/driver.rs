//! Modelo de Driver
//!
//! Los conductores se registran con su clase de licencia, la fecha de
//! vencimiento y un puntaje de seguridad 0-100.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Clase de licencia - mapea al ENUM license_class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "license_class", rename_all = "lowercase")]
pub enum LicenseClass {
    Bike,
    Van,
    Truck,
}

/// Estado del conductor - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
#[sqlx(type_name = "driver_status", rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Available,
    #[serde(rename = "On Trip", alias = "OnTrip")]
    OnTrip,
    #[serde(rename = "Off Duty", alias = "OffDuty")]
    OffDuty,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license_class: LicenseClass,
    pub license_expiry: NaiveDate,
    pub safety_score: i32,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(
        name: String,
        license_class: LicenseClass,
        license_expiry: NaiveDate,
        safety_score: i32,
        status: DriverStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            license_class,
            license_expiry,
            safety_score,
            status,
            created_at: Utc::now(),
        }
    }
}
