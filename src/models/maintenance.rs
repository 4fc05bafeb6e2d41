//! Modelo de MaintenanceRecord

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub issue: String,
    pub date: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Sin fecha explícita se usa el momento de creación
    pub fn new(vehicle_id: Uuid, issue: String, date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            issue,
            date: date.unwrap_or_else(Utc::now),
        }
    }
}
