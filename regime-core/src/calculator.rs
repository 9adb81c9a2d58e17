//! Regime comparison orchestration.
//!
//! The orchestrator runs the whole pipeline for one taxpayer: validate the
//! form, check the rule set, assess both regimes, recommend the cheaper one.
//! Failures of any kind fold into the error record — the public entry
//! points never panic and never return a bare `Err`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::models::TaxForm;
//! use regime_core::calculate_tax;
//!
//! let form = TaxForm {
//!     annual_salary: Some("10,00,000".into()),
//!     age_category: Some("below_60".into()),
//!     is_salaried: Some("on".into()),
//!     ..TaxForm::default()
//! };
//!
//! let comparison = calculate_tax(&form).comparison().unwrap().clone();
//!
//! // Full 87A rebate under the new regime wipes the liability out.
//! assert_eq!(comparison.new_regime.tax_liability, dec!(0));
//! assert_eq!(comparison.recommended_regime.as_str(), "new");
//! ```

use thiserror::Error;
use tracing::warn;

use crate::calculations::common::Overflow;
use crate::calculations::{NewRegimeCalculator, OldRegimeCalculator};
use crate::models::{Regime, RegimeComparison, TaxForm, TaxResult};
use crate::rules::{RuleSet, RuleSetError};
use crate::validate::{ValidationError, validate};

/// Any failure the orchestration pipeline can hit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rules(#[from] RuleSetError),

    #[error(transparent)]
    Computation(#[from] Overflow),
}

/// Compares old- and new-regime liabilities under one rule set.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rules: &'a RuleSet,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Runs the pipeline, folding every failure into the error record.
    ///
    /// A success carries both regime results, a recommendation and the
    /// savings; an error carries a human-readable message and no partial
    /// regime results.
    pub fn calculate(&self, form: &TaxForm) -> TaxResult {
        match self.try_calculate(form) {
            Ok(comparison) => TaxResult::Success(comparison),
            Err(error) => {
                warn!(%error, "calculation rejected");
                TaxResult::error(error.to_string())
            }
        }
    }

    /// The same pipeline with a typed error, for callers that branch on the
    /// failure kind.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] when the form fails validation, the rule set
    /// fails its own validation, or an additive stage overflows the
    /// arithmetic.
    pub fn try_calculate(&self, form: &TaxForm) -> Result<RegimeComparison, TaxError> {
        let profile = validate(form, self.rules)?;
        self.rules.validate()?;

        let old_regime = OldRegimeCalculator::new(&self.rules.old_regime, self.rules.cess_rate)
            .assess(&profile)?;
        let new_regime = NewRegimeCalculator::new(&self.rules.new_regime, self.rules.cess_rate)
            .assess(&profile)?;

        // Ties favor the new regime.
        let recommended_regime = if new_regime.tax_liability <= old_regime.tax_liability {
            Regime::New
        } else {
            Regime::Old
        };
        let tax_savings = (old_regime.tax_liability - new_regime.tax_liability).abs();

        Ok(RegimeComparison {
            calculation_assumptions: self.rules.assumptions.clone(),
            old_regime,
            new_regime,
            recommended_regime,
            tax_savings,
        })
    }
}

/// Compares both regimes under the FY 2025-26 rule set.
pub fn calculate_tax(form: &TaxForm) -> TaxResult {
    TaxCalculator::new(RuleSet::fy_2025_26()).calculate(form)
}
