//! Services module
//!
//! Este módulo contiene la lógica de negocio pura de la aplicación,
//! sin acceso a la base de datos.

pub mod compliance_service;

pub use compliance_service::{ComplianceAssessment, CompliancePolicy, DEFAULT_RETRAINING_THRESHOLD};
