use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Driver, MaintenanceRecord, Trip, Vehicle, VehicleStatus};
use crate::utils::errors::AppResult;

/// Almacenamiento de la flota.
///
/// Las escrituras emparejadas (`record_trip`, `record_maintenance`) insertan el
/// registro y cambian el estado del vehículo como una sola unidad: o se aplican
/// ambas o ninguna. Ambas comparan `expected_version` con la versión actual del
/// vehículo y fallan con `AppError::Conflict` si otra escritura ganó la carrera.
#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Instantánea en orden de inserción
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// Sobrescritura incondicional del estado. `None` si el vehículo no existe.
    async fn overwrite_vehicle_status(
        &self,
        id: Uuid,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>>;

    /// Inserta el viaje y pasa el vehículo a `OnTrip`
    async fn record_trip(&self, trip: &Trip, expected_version: i64) -> AppResult<Vehicle>;

    /// Inserta el registro de mantenimiento y pasa el vehículo a `InShop`
    async fn record_maintenance(
        &self,
        record: &MaintenanceRecord,
        expected_version: i64,
    ) -> AppResult<Vehicle>;

    async fn list_trips(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<Trip>>;

    async fn list_maintenance(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<MaintenanceRecord>>;

    async fn insert_driver(&self, driver: &Driver) -> AppResult<Driver>;

    async fn find_driver(&self, id: Uuid) -> AppResult<Option<Driver>>;

    async fn list_drivers(&self) -> AppResult<Vec<Driver>>;
}
