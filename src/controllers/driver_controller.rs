use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse};
use crate::models::Driver;
use crate::repositories::FleetRepository;
use crate::services::CompliancePolicy;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::validate_not_empty;

/// Los conductores marcados para re-entrenamiento siguen apareciendo en los
/// listados; solo quedan excluidos del despacho.
pub struct DriverController {
    repository: Arc<dyn FleetRepository>,
    policy: CompliancePolicy,
}

impl DriverController {
    pub fn new(repository: Arc<dyn FleetRepository>, policy: CompliancePolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn register(&self, request: CreateDriverRequest) -> AppResult<DriverResponse> {
        request.validate()?;

        let name = validate_not_empty("name", request.name.as_deref())?;
        let driver = Driver::new(
            name,
            request.license_class,
            request.license_expiry,
            request.safety_score.unwrap_or(100),
            request.status.unwrap_or_default(),
        );

        let driver = self.repository.insert_driver(&driver).await?;
        info!("🧑‍✈️ Conductor registrado: {} ({})", driver.name, driver.id);
        Ok(self.respond(driver))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<DriverResponse> {
        let driver = self
            .repository
            .find_driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id))?;

        Ok(self.respond(driver))
    }

    pub async fn list(&self) -> AppResult<Vec<DriverResponse>> {
        let drivers = self.repository.list_drivers().await?;
        Ok(drivers.into_iter().map(|driver| self.respond(driver)).collect())
    }

    fn respond(&self, driver: Driver) -> DriverResponse {
        let assessment = self.policy.assess(&driver);
        DriverResponse::new(driver, assessment)
    }
}
