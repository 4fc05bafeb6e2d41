pub mod driver_controller;
pub mod maintenance_controller;
pub mod trip_controller;
pub mod vehicle_controller;
