use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::models::Driver;

/// Puntaje de seguridad mínimo por defecto antes de exigir re-entrenamiento
pub const DEFAULT_RETRAINING_THRESHOLD: i32 = 80;

/// Resultado de evaluar a un conductor contra la política de cumplimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAssessment {
    pub eligible: bool,
    pub license_expired: bool,
    pub needs_retraining: bool,
}

impl ComplianceAssessment {
    /// Motivo legible del rechazo, si lo hay
    pub fn reason(&self) -> Option<&'static str> {
        match (self.license_expired, self.needs_retraining) {
            (true, true) => Some("license expired and safety score below retraining threshold"),
            (true, false) => Some("license expired"),
            (false, true) => Some("safety score below retraining threshold"),
            (false, false) => None,
        }
    }
}

/// Política de cumplimiento de conductores (licencia vigente + puntaje de seguridad)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompliancePolicy {
    retraining_threshold: i32,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRAINING_THRESHOLD)
    }
}

impl CompliancePolicy {
    pub fn new(retraining_threshold: i32) -> Self {
        Self { retraining_threshold }
    }

    pub fn retraining_threshold(&self) -> i32 {
        self.retraining_threshold
    }

    /// Verifica si un conductor puede ser asignado a un viaje hoy
    pub fn is_eligible(&self, driver: &Driver) -> bool {
        self.assess(driver).eligible
    }

    pub fn assess(&self, driver: &Driver) -> ComplianceAssessment {
        self.assess_on(driver, Utc::now().date_naive())
    }

    /// Evaluación contra una fecha dada. Una licencia que vence hoy sigue vigente.
    pub fn assess_on(&self, driver: &Driver, today: NaiveDate) -> ComplianceAssessment {
        let license_expired = driver.license_expiry < today;
        let needs_retraining = driver.safety_score < self.retraining_threshold;

        ComplianceAssessment {
            eligible: !license_expired && !needs_retraining,
            license_expired,
            needs_retraining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, LicenseClass};

    fn driver(expiry: NaiveDate, score: i32) -> Driver {
        Driver::new(
            "Sarah Smith".into(),
            LicenseClass::Truck,
            expiry,
            score,
            DriverStatus::Available,
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_license_and_good_score_is_eligible() {
        let policy = CompliancePolicy::default();
        let assessment = policy.assess_on(&driver(day(2027, 1, 1), 95), day(2026, 6, 1));
        assert!(assessment.eligible);
        assert_eq!(assessment.reason(), None);
    }

    #[test]
    fn test_expired_license_blocks_dispatch() {
        let policy = CompliancePolicy::default();
        let assessment = policy.assess_on(&driver(day(2026, 5, 31), 95), day(2026, 6, 1));
        assert!(!assessment.eligible);
        assert!(assessment.license_expired);
        assert_eq!(assessment.reason(), Some("license expired"));
    }

    #[test]
    fn test_license_expiring_today_is_still_valid() {
        let policy = CompliancePolicy::default();
        assert!(policy.assess_on(&driver(day(2026, 6, 1), 95), day(2026, 6, 1)).eligible);
    }

    #[test]
    fn test_low_safety_score_flags_retraining() {
        let policy = CompliancePolicy::default();
        let today = day(2026, 6, 1);
        let flagged = policy.assess_on(&driver(day(2027, 1, 1), 79), today);
        assert!(flagged.needs_retraining);
        assert!(!flagged.eligible);
        assert!(policy.assess_on(&driver(day(2027, 1, 1), 80), today).eligible);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = CompliancePolicy::new(95);
        let assessment = strict.assess_on(&driver(day(2027, 1, 1), 90), day(2026, 6, 1));
        assert!(assessment.needs_retraining);
        assert_eq!(strict.retraining_threshold(), 95);
    }

    #[test]
    fn test_is_eligible_uses_current_date() {
        let policy = CompliancePolicy::default();
        let today = Utc::now().date_naive();
        assert!(policy.is_eligible(&driver(today, 100)));
        assert!(!policy.is_eligible(&driver(today.pred_opt().unwrap(), 100)));
    }
}
