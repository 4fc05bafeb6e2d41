use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MaintenanceRecord;

// Request para reportar una avería
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIssueRequest {
    pub vehicle_id: Option<String>,
    pub issue: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

// Response de registro de mantenimiento
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub issue: String,
    pub date: DateTime<Utc>,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            issue: record.issue,
            date: record.date,
        }
    }
}
