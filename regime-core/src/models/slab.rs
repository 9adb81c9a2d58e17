use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a slab schedule fails structural validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabScheduleError {
    /// The schedule contains no slabs at all.
    #[error("slab schedule '{0}' is empty")]
    Empty(String),

    /// The final slab carries an upper bound; the schedule does not cover
    /// arbitrarily large incomes.
    #[error("slab schedule '{0}' does not end with an open-ended slab")]
    NotOpenEnded(String),

    /// A slab before the final position has no upper bound.
    #[error("slab schedule '{0}' has an open-ended slab before the last position")]
    EarlyOpenSlab(String),

    /// Upper bounds must be strictly increasing and positive.
    #[error("slab schedule '{0}' has out-of-order upper bound {1}")]
    BoundsOutOfOrder(String, Decimal),

    /// Marginal rates must not decrease as income rises.
    #[error("slab schedule '{0}' has decreasing rate {1}")]
    DecreasingRate(String, Decimal),

    /// A marginal rate lies outside [0, 1].
    #[error("slab schedule '{0}' has rate {1} outside [0, 1]")]
    RateOutOfRange(String, Decimal),
}

/// One slab of a progressive schedule.
///
/// Lower bounds are implicit: a slab starts where the previous one ends, the
/// first at zero. `upper_bound = None` marks the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub upper_bound: Option<Decimal>,
    /// Marginal rate within the slab, as a fraction (`0.05` = 5%).
    pub rate: Decimal,
}

/// An ordered progressive slab schedule covering [0, ∞).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabSchedule {
    pub slabs: Vec<TaxSlab>,
}

impl SlabSchedule {
    pub fn new(slabs: Vec<TaxSlab>) -> Self {
        Self { slabs }
    }

    /// Validates the schedule's structural invariants. `name` identifies the
    /// schedule in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SlabScheduleError`] if the schedule is empty, does not end
    /// with exactly one open-ended slab, has bounds that fail to strictly
    /// increase, or has rates that decrease or fall outside [0, 1].
    pub fn validate(&self, name: &str) -> Result<(), SlabScheduleError> {
        if self.slabs.is_empty() {
            return Err(SlabScheduleError::Empty(name.to_string()));
        }

        let last = self.slabs.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;
        for (position, slab) in self.slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
                return Err(SlabScheduleError::RateOutOfRange(
                    name.to_string(),
                    slab.rate,
                ));
            }
            if slab.rate < previous_rate {
                return Err(SlabScheduleError::DecreasingRate(
                    name.to_string(),
                    slab.rate,
                ));
            }
            previous_rate = slab.rate;

            match slab.upper_bound {
                Some(bound) => {
                    if position == last {
                        return Err(SlabScheduleError::NotOpenEnded(name.to_string()));
                    }
                    if bound <= previous_bound {
                        return Err(SlabScheduleError::BoundsOutOfOrder(name.to_string(), bound));
                    }
                    previous_bound = bound;
                }
                None => {
                    if position != last {
                        return Err(SlabScheduleError::EarlyOpenSlab(name.to_string()));
                    }
                }
            }
        }
        Ok(())
    }
}
