use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleStatusRequest, VehicleResponse};
use crate::models::{Vehicle, VehicleStatus};
use crate::repositories::FleetRepository;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::{parse_kilograms, validate_not_empty};

/// Registro de vehículos: única fuente de verdad sobre el estado de cada vehículo
pub struct VehicleController {
    repository: Arc<dyn FleetRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;

        let name = validate_not_empty("name", request.name.as_deref())?;
        let capacity =
            parse_kilograms("capacity", request.capacity.as_ref())?.into_amount("capacity")?;
        let license_plate = request
            .license_plate
            .map(|plate| plate.trim().to_string())
            .filter(|plate| !plate.is_empty());

        let vehicle = self
            .repository
            .insert_vehicle(&Vehicle::register(name, license_plate, capacity))
            .await?;

        info!(
            "🚗 Vehículo registrado: {} ({}, {} kg)",
            vehicle.name, vehicle.id, vehicle.capacity
        );
        Ok(vehicle.into())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.list_vehicles().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    /// Corrección manual del operador: cualquier estado a cualquier estado
    pub async fn set_status(
        &self,
        id: Uuid,
        request: UpdateVehicleStatusRequest,
    ) -> AppResult<VehicleResponse> {
        let raw = request
            .status
            .ok_or_else(|| validation_error("status is required"))?;
        let status = raw
            .parse::<VehicleStatus>()
            .map_err(|e| validation_error(e.to_string()))?;

        let vehicle = self
            .repository
            .overwrite_vehicle_status(id, status)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id))?;

        info!("🛠️ Estado de {} fijado manualmente a {}", vehicle.id, vehicle.status);
        Ok(vehicle.into())
    }
}
