//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables tienen
//! un valor por defecto razonable para desarrollo; los valores inválidos se
//! reportan como error de arranque.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::services::{CompliancePolicy, DEFAULT_RETRAINING_THRESHOLD};

/// Backend de almacenamiento de la flota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            other => Err(anyhow!(
                "unknown store backend '{}' (expected memory or postgres)",
                other
            )),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub store: StoreBackend,
    pub retraining_threshold: i32,
    /// Rechazar despachos de vehículos que no estén "Available"
    pub enforce_available_dispatch: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            store: StoreBackend::Memory,
            retraining_threshold: DEFAULT_RETRAINING_THRESHOLD,
            enforce_available_dispatch: true,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let retraining_threshold: i32 =
            parse_var(&lookup, "RETRAINING_THRESHOLD", defaults.retraining_threshold)?;
        if !(0..=100).contains(&retraining_threshold) {
            bail!("RETRAINING_THRESHOLD must be between 0 and 100, got {}", retraining_threshold);
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store: parse_var(&lookup, "FLEET_STORE", defaults.store)?,
            retraining_threshold,
            enforce_available_dispatch: match lookup("ENFORCE_AVAILABLE_DISPATCH") {
                Some(raw) => parse_flag(&raw).context("ENFORCE_AVAILABLE_DISPATCH")?,
                None => defaults.enforce_available_dispatch,
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn compliance_policy(&self) -> CompliancePolicy {
        CompliancePolicy::new(self.retraining_threshold)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.retraining_threshold, 80);
        assert!(config.enforce_available_dispatch);
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("FLEET_STORE", "postgres"),
            ("RETRAINING_THRESHOLD", "70"),
            ("ENFORCE_AVAILABLE_DISPATCH", "false"),
            ("CORS_ORIGINS", "http://localhost:5173, https://fleet.example.com"),
        ])
        .unwrap();
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.compliance_policy().retraining_threshold(), 70);
        assert!(!config.enforce_available_dispatch);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("FLEET_STORE", "redis")]).is_err());
        assert!(config_from(&[("RETRAINING_THRESHOLD", "101")]).is_err());
        assert!(config_from(&[("ENFORCE_AVAILABLE_DISPATCH", "maybe")]).is_err());
    }
}
