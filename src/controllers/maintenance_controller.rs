use std::sync::Arc;

use tracing::info;

use crate::dto::maintenance_dto::{MaintenanceResponse, ReportIssueRequest};
use crate::dto::trip_dto::HistoryFilters;
use crate::models::MaintenanceRecord;
use crate::repositories::FleetRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::{optional_uuid, require_uuid, validate_not_empty};

/// Ingreso a taller. Una avería manda al vehículo a "In Shop" sin importar
/// su estado previo, incluso si estaba en viaje.
pub struct MaintenanceController {
    repository: Arc<dyn FleetRepository>,
}

impl MaintenanceController {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    pub async fn report_issue(
        &self,
        request: ReportIssueRequest,
    ) -> AppResult<MaintenanceResponse> {
        let vehicle_id = require_uuid("vehicleId", request.vehicle_id.as_deref())?;
        let vehicle = self
            .repository
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;

        let issue = validate_not_empty("issue", request.issue.as_deref())?;
        let record = MaintenanceRecord::new(vehicle.id, issue, request.date);

        let previous = vehicle.status;
        let vehicle = self
            .repository
            .record_maintenance(&record, vehicle.version)
            .await?;

        info!(
            "🔧 Avería reportada para {}: \"{}\" ({} → {})",
            vehicle.name, record.issue, previous, vehicle.status
        );
        Ok(record.into())
    }

    pub async fn list(&self, filters: HistoryFilters) -> AppResult<Vec<MaintenanceResponse>> {
        let vehicle_id = optional_uuid("vehicleId", filters.vehicle_id.as_deref())?;
        let records = self.repository.list_maintenance(vehicle_id).await?;
        Ok(records.into_iter().map(MaintenanceResponse::from).collect())
    }
}
