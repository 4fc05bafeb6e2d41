use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::trip_dto::{DispatchTripRequest, HistoryFilters, TripResponse};
use crate::models::{Trip, Vehicle};
use crate::repositories::FleetRepository;
use crate::services::CompliancePolicy;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{Kilograms, optional_uuid, parse_kilograms, require_uuid};

/// Autorizador de despachos.
///
/// Cadena de precondiciones, la primera que falla gana:
/// vehículo existe → peso positivo → peso <= capacidad → conductor apto
/// (si se indica) → vehículo disponible.
pub struct TripController {
    repository: Arc<dyn FleetRepository>,
    policy: CompliancePolicy,
    enforce_available: bool,
}

impl TripController {
    pub fn new(
        repository: Arc<dyn FleetRepository>,
        policy: CompliancePolicy,
        enforce_available: bool,
    ) -> Self {
        Self {
            repository,
            policy,
            enforce_available,
        }
    }

    pub async fn dispatch(&self, request: DispatchTripRequest) -> AppResult<TripResponse> {
        let vehicle_id = require_uuid("vehicleId", request.vehicle_id.as_deref())?;
        let vehicle = self
            .repository
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;

        request.validate()?;
        let cargo_weight = match parse_kilograms("cargoWeight", request.cargo_weight.as_ref())? {
            Kilograms::Amount(weight) if vehicle.can_carry(weight) => weight,
            Kilograms::Amount(weight) => {
                return Err(capacity_exceeded(&vehicle, weight.to_string()));
            }
            Kilograms::Overflow(raw) => return Err(capacity_exceeded(&vehicle, raw)),
        };

        let driver_id = optional_uuid("driverId", request.driver_id.as_deref())?;
        if let Some(driver_id) = driver_id {
            self.authorize_driver(driver_id).await?;
        }

        if self.enforce_available && !vehicle.is_available() {
            return Err(AppError::InvalidState(format!(
                "Vehicle {} is {} and cannot be dispatched",
                vehicle.name, vehicle.status
            )));
        }

        let destination = request
            .destination
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let trip = Trip::new(vehicle.id, driver_id, cargo_weight, destination);

        let vehicle = self.repository.record_trip(&trip, vehicle.version).await?;

        info!(
            "🚚 Viaje {} despachado: vehículo {} con {} kg (estado {})",
            trip.id, vehicle.name, trip.cargo_weight, vehicle.status
        );
        Ok(trip.into())
    }

    async fn authorize_driver(&self, driver_id: Uuid) -> AppResult<()> {
        let driver = self
            .repository
            .find_driver(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &driver_id))?;

        let assessment = self.policy.assess(&driver);
        if let Some(reason) = assessment.reason() {
            warn!("🚫 Conductor {} no apto: {}", driver.name, reason);
            return Err(AppError::InvalidState(format!(
                "Driver {} is not eligible for dispatch: {}",
                driver.name, reason
            )));
        }

        Ok(())
    }

    pub async fn list(&self, filters: HistoryFilters) -> AppResult<Vec<TripResponse>> {
        let vehicle_id = optional_uuid("vehicleId", filters.vehicle_id.as_deref())?;
        let trips = self.repository.list_trips(vehicle_id).await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }
}

fn capacity_exceeded(vehicle: &Vehicle, requested: String) -> AppError {
    AppError::CapacityExceeded {
        vehicle_id: vehicle.id,
        capacity: vehicle.capacity,
        requested,
    }
}
