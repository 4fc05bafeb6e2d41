//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de la flota.

pub mod driver;
pub mod maintenance;
pub mod trip;
pub mod vehicle;

pub use driver::{Driver, DriverStatus, LicenseClass};
pub use maintenance::MaintenanceRecord;
pub use trip::Trip;
pub use vehicle::{Vehicle, VehicleStatus};
