//! Repositorio PostgreSQL
//!
//! Las escrituras emparejadas corren dentro de una transacción: primero el
//! `UPDATE ... WHERE version = $2` (compare-and-swap), luego el `INSERT` del
//! registro. Si el CAS no afecta filas se hace rollback y se devuelve conflicto.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Driver, MaintenanceRecord, Trip, Vehicle, VehicleStatus};
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::{conflict_error, AppResult};

const CLAIM_VEHICLE: &str = r#"
    UPDATE vehicles
    SET status = $3, version = version + 1, updated_at = now()
    WHERE id = $1 AND version = $2
    RETURNING *
"#;

#[derive(Clone)]
pub struct PgFleetRepository {
    pool: PgPool,
}

impl PgFleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetRepository for PgFleetRepository {
    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (id, name, license_plate, capacity, status, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.license_plate)
        .bind(vehicle.capacity)
        .bind(vehicle.status)
        .bind(vehicle.version)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn overwrite_vehicle_status(
        &self,
        id: Uuid,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET status = $2, version = version + 1, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn record_trip(&self, trip: &Trip, expected_version: i64) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query_as::<_, Vehicle>(CLAIM_VEHICLE)
            .bind(trip.vehicle_id)
            .bind(expected_version)
            .bind(VehicleStatus::OnTrip)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(vehicle) = claimed else {
            tx.rollback().await?;
            debug!("🔁 CAS lost on vehicle {} (version {})", trip.vehicle_id, expected_version);
            return Err(conflict_error("Vehicle", &trip.vehicle_id));
        };

        sqlx::query(
            r#"
            INSERT INTO trips (id, vehicle_id, driver_id, cargo_weight, destination, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(trip.id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.cargo_weight)
        .bind(&trip.destination)
        .bind(trip.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("💾 Trip {} stored, vehicle {} now {}", trip.id, vehicle.id, vehicle.status);
        Ok(vehicle)
    }

    async fn record_maintenance(
        &self,
        record: &MaintenanceRecord,
        expected_version: i64,
    ) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query_as::<_, Vehicle>(CLAIM_VEHICLE)
            .bind(record.vehicle_id)
            .bind(expected_version)
            .bind(VehicleStatus::InShop)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(vehicle) = claimed else {
            tx.rollback().await?;
            debug!("🔁 CAS lost on vehicle {} (version {})", record.vehicle_id, expected_version);
            return Err(conflict_error("Vehicle", &record.vehicle_id));
        };

        sqlx::query(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, issue, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(&record.issue)
        .bind(record.date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            "💾 Maintenance {} stored, vehicle {} now {}",
            record.id, vehicle.id, vehicle.status
        );
        Ok(vehicle)
    }

    async fn list_trips(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE ($1::uuid IS NULL OR vehicle_id = $1) ORDER BY seq",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    async fn list_maintenance(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<MaintenanceRecord>> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
            ORDER BY seq
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert_driver(&self, driver: &Driver) -> AppResult<Driver> {
        let result = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers
                (id, name, license_class, license_expiry, safety_score, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(driver.license_class)
        .bind(driver.license_expiry)
        .bind(driver.safety_score)
        .bind(driver.status)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_driver(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::connect_and_migrate;
    use crate::utils::errors::AppError;
    use rust_decimal::Decimal;

    // cargo test -- --ignored con DATABASE_URL apuntando a una base desechable
    async fn repository() -> Option<PgFleetRepository> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = connect_and_migrate(&DatabaseConfig::new(url)).await.unwrap();
        Some(PgFleetRepository::new(pool))
    }

    async fn seeded(repository: &PgFleetRepository) -> Vehicle {
        let vehicle = Vehicle::register("APEX".into(), None, Decimal::from(5000));
        repository.insert_vehicle(&vehicle).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_stale_trip_write_rolls_back() {
        let Some(repository) = repository().await else { return };
        let vehicle = seeded(&repository).await;
        let bumped = repository
            .overwrite_vehicle_status(vehicle.id, VehicleStatus::Available)
            .await
            .unwrap()
            .unwrap();

        let trip = Trip::new(vehicle.id, None, Decimal::from(4500), None);
        let err = repository.record_trip(&trip, vehicle.version).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(repository.list_trips(Some(vehicle.id)).await.unwrap().is_empty());
        let current = repository.find_vehicle(vehicle.id).await.unwrap().unwrap();
        assert_eq!(current.status, VehicleStatus::Available);
        assert_eq!(current.version, bumped.version);

        let claimed = repository.record_trip(&trip, bumped.version).await.unwrap();
        assert_eq!(claimed.status, VehicleStatus::OnTrip);
        assert_eq!(claimed.version, bumped.version + 1);
        assert_eq!(repository.list_trips(Some(vehicle.id)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_stale_maintenance_write_rolls_back() {
        let Some(repository) = repository().await else { return };
        let vehicle = seeded(&repository).await;
        let trip = Trip::new(vehicle.id, None, Decimal::from(100), None);
        repository.record_trip(&trip, vehicle.version).await.unwrap();

        let record = MaintenanceRecord::new(vehicle.id, "brake wear".into(), None);
        let err = repository
            .record_maintenance(&record, vehicle.version)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(repository.list_maintenance(Some(vehicle.id)).await.unwrap().is_empty());
        let current = repository.find_vehicle(vehicle.id).await.unwrap().unwrap();
        assert_eq!(current.status, VehicleStatus::OnTrip);
    }
}
