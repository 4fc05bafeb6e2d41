pub mod fleet_repository;
pub mod memory_fleet_repository;
pub mod pg_fleet_repository;

pub use fleet_repository::FleetRepository;
pub use memory_fleet_repository::MemoryFleetRepository;
pub use pg_fleet_repository::PgFleetRepository;
