//! FleetFlow backend
//!
//! Registro de vehículos, autorización de despachos, ingreso a taller y
//! cumplimiento de conductores detrás de una API REST.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
