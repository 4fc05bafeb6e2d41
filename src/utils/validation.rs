//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos que llegan desde los cuerpos JSON.

use std::fmt::Display;
use std::str::FromStr;

use num_traits::Zero;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::utils::errors::{validation_error, AppResult};

/// Validar y convertir un identificador textual a UUID
pub fn validate_uuid(field: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| validation_error(format!("{} is not a valid id: '{}'", field, value)))
}

/// Validar un identificador obligatorio
pub fn require_uuid(field: &str, value: Option<&str>) -> AppResult<Uuid> {
    match value {
        Some(raw) if !raw.trim().is_empty() => validate_uuid(field, raw),
        _ => Err(validation_error(format!("{} is required", field))),
    }
}

/// Validar un identificador opcional (cadena vacía equivale a ausente)
pub fn optional_uuid(field: &str, value: Option<&str>) -> AppResult<Option<Uuid>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => validate_uuid(field, raw).map(Some),
        _ => Ok(None),
    }
}

/// Validar que un string no esté vacío y devolverlo sin espacios sobrantes
pub fn validate_not_empty(field: &str, value: Option<&str>) -> AppResult<String> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(validation_error(format!("{} is required", field))),
    }
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + Display + Zero>(field: &str, value: T) -> AppResult<()> {
    if value <= T::zero() {
        return Err(validation_error(format!(
            "{} must be greater than 0, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Peso leído de un cuerpo JSON
#[derive(Debug, Clone, PartialEq)]
pub enum Kilograms {
    Amount(Decimal),
    /// Número positivo válido que no cabe en `Decimal`; conserva el texto recibido
    Overflow(String),
}

impl Kilograms {
    /// Exigir un valor representable (registro de capacidad)
    pub fn into_amount(self, field: &str) -> AppResult<Decimal> {
        match self {
            Kilograms::Amount(amount) => Ok(amount),
            Kilograms::Overflow(raw) => Err(validation_error(format!(
                "{} is too large, got '{}'",
                field, raw
            ))),
        }
    }
}

/// Convertir un peso en kilogramos recibido como número JSON (o string numérico),
/// exigiendo que sea estrictamente positivo.
pub fn parse_kilograms(field: &str, value: Option<&Value>) -> AppResult<Kilograms> {
    let raw = match value {
        None | Some(Value::Null) => {
            return Err(validation_error(format!("{} is required", field)));
        }
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(_) => {
            return Err(validation_error(format!("{} must be a number", field)));
        }
    };

    match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(amount) => {
            validate_positive(field, amount)?;
            Ok(Kilograms::Amount(amount.normalize()))
        }
        Err(_) => parse_out_of_range(field, raw),
    }
}

// Números bien formados fuera del rango de `Decimal`
fn parse_out_of_range(field: &str, raw: String) -> AppResult<Kilograms> {
    let numeric = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    let approx = match raw.parse::<f64>() {
        Ok(approx) if numeric && !approx.is_nan() => approx,
        _ => {
            return Err(validation_error(format!(
                "{} must be a number, got '{}'",
                field, raw
            )));
        }
    };

    validate_positive(field, approx)?;
    if approx < 1.0 {
        return Err(validation_error(format!("{} is too small, got '{}'", field, raw)));
    }
    Ok(Kilograms::Overflow(raw))
}
