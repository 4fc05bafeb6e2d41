//! Repositorio en memoria
//!
//! Backend por defecto y el que usan los tests. Todas las tablas viven detrás
//! de un único `RwLock`, así que cada escritura emparejada es atómica.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Driver, MaintenanceRecord, Trip, Vehicle, VehicleStatus};
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Debug, Default)]
struct FleetTables {
    vehicles: HashMap<Uuid, Vehicle>,
    vehicle_order: Vec<Uuid>,
    trips: Vec<Trip>,
    maintenance: Vec<MaintenanceRecord>,
    drivers: HashMap<Uuid, Driver>,
    driver_order: Vec<Uuid>,
}

impl FleetTables {
    /// Compare-and-swap sobre la versión del vehículo
    fn claim_vehicle(
        &mut self,
        id: Uuid,
        expected_version: i64,
        status: VehicleStatus,
    ) -> AppResult<Vehicle> {
        let vehicle = self
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", &id))?;

        if vehicle.version != expected_version {
            debug!(
                "🔁 Version mismatch on vehicle {}: expected {}, found {}",
                id, expected_version, vehicle.version
            );
            return Err(conflict_error("Vehicle", &id));
        }

        vehicle.transition_to(status);
        Ok(vehicle.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFleetRepository {
    tables: RwLock<FleetTables>,
}

impl MemoryFleetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FleetRepository for MemoryFleetRepository {
    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        tables.vehicle_order.push(vehicle.id);
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.get(&id).cloned())
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicle_order
            .iter()
            .filter_map(|id| tables.vehicles.get(id).cloned())
            .collect())
    }

    async fn overwrite_vehicle_status(
        &self,
        id: Uuid,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.write().await;
        Ok(tables.vehicles.get_mut(&id).map(|vehicle| {
            vehicle.transition_to(status);
            vehicle.clone()
        }))
    }

    async fn record_trip(&self, trip: &Trip, expected_version: i64) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        let vehicle =
            tables.claim_vehicle(trip.vehicle_id, expected_version, VehicleStatus::OnTrip)?;
        tables.trips.push(trip.clone());
        Ok(vehicle)
    }

    async fn record_maintenance(
        &self,
        record: &MaintenanceRecord,
        expected_version: i64,
    ) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        let vehicle =
            tables.claim_vehicle(record.vehicle_id, expected_version, VehicleStatus::InShop)?;
        tables.maintenance.push(record.clone());
        Ok(vehicle)
    }

    async fn list_trips(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<Trip>> {
        let tables = self.tables.read().await;
        Ok(tables
            .trips
            .iter()
            .filter(|trip| vehicle_id.map_or(true, |id| trip.vehicle_id == id))
            .cloned()
            .collect())
    }

    async fn list_maintenance(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .maintenance
            .iter()
            .filter(|record| vehicle_id.map_or(true, |id| record.vehicle_id == id))
            .cloned()
            .collect())
    }

    async fn insert_driver(&self, driver: &Driver) -> AppResult<Driver> {
        let mut tables = self.tables.write().await;
        tables.driver_order.push(driver.id);
        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver.clone())
    }

    async fn find_driver(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables.drivers.get(&id).cloned())
    }

    async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables
            .driver_order
            .iter()
            .filter_map(|id| tables.drivers.get(id).cloned())
            .collect())
    }
}
