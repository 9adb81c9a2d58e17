use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a surcharge schedule fails structural validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurchargeScheduleError {
    /// A threshold is not positive.
    #[error("surcharge schedule '{0}' has non-positive threshold {1}")]
    NonPositiveThreshold(String, Decimal),

    /// Thresholds must be strictly increasing.
    #[error("surcharge schedule '{0}' has out-of-order threshold {1}")]
    ThresholdsOutOfOrder(String, Decimal),

    /// A surcharge rate lies outside [0, 1].
    #[error("surcharge schedule '{0}' has rate {1} outside [0, 1]")]
    RateOutOfRange(String, Decimal),
}

/// One surcharge tier: the tier's rate applies to taxpayers whose taxable
/// income strictly exceeds `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub threshold: Decimal,
    /// Surcharge rate as a fraction of tax after rebate (`0.10` = 10%).
    pub rate: Decimal,
}

/// Ordered surcharge tiers for one regime.
///
/// An empty schedule is valid and means no surcharge is ever levied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeSchedule {
    pub tiers: Vec<SurchargeTier>,
}

impl SurchargeSchedule {
    pub fn new(tiers: Vec<SurchargeTier>) -> Self {
        Self { tiers }
    }

    /// Validates the schedule's structural invariants. `name` identifies the
    /// schedule in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SurchargeScheduleError`] if a threshold is non-positive,
    /// thresholds fail to strictly increase, or a rate falls outside [0, 1].
    pub fn validate(&self, name: &str) -> Result<(), SurchargeScheduleError> {
        let mut previous_threshold = Decimal::ZERO;
        for tier in &self.tiers {
            if tier.threshold <= Decimal::ZERO {
                return Err(SurchargeScheduleError::NonPositiveThreshold(
                    name.to_string(),
                    tier.threshold,
                ));
            }
            if tier.threshold <= previous_threshold {
                return Err(SurchargeScheduleError::ThresholdsOutOfOrder(
                    name.to_string(),
                    tier.threshold,
                ));
            }
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(SurchargeScheduleError::RateOutOfRange(
                    name.to_string(),
                    tier.rate,
                ));
            }
            previous_threshold = tier.threshold;
        }
        Ok(())
    }
}
