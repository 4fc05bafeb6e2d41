use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Driver, DriverStatus, LicenseClass};
use crate::services::ComplianceAssessment;

// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub license_class: LicenseClass,
    pub license_expiry: NaiveDate,
    #[validate(range(min = 0, max = 100))]
    pub safety_score: Option<i32>,
    pub status: Option<DriverStatus>,
}

// Response de conductor con las banderas de cumplimiento aplanadas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub license_class: LicenseClass,
    pub license_expiry: NaiveDate,
    pub safety_score: i32,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub compliance: ComplianceAssessment,
}

impl DriverResponse {
    pub fn new(driver: Driver, compliance: ComplianceAssessment) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            license_class: driver.license_class,
            license_expiry: driver.license_expiry,
            safety_score: driver.safety_score,
            status: driver.status,
            created_at: driver.created_at,
            compliance,
        }
    }
}
