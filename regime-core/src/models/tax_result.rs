use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Regime, RegimeResult};

/// Successful comparison of both regimes for one taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    /// Human-readable description of the rule set the figures were computed
    /// under.
    pub calculation_assumptions: String,
    pub old_regime: RegimeResult,
    pub new_regime: RegimeResult,
    /// The regime with the lower liability; ties favor the new regime.
    pub recommended_regime: Regime,
    /// Absolute liability difference between the two regimes.
    pub tax_savings: Decimal,
}

/// Outcome of a calculation request.
///
/// Serializes as `{"status": "success", …}` or
/// `{"status": "error", "message": …}`; callers never see a panic or a bare
/// `Err` from the public entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaxResult {
    Success(RegimeComparison),
    Error { message: String },
}

impl TaxResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The comparison payload, when the calculation succeeded.
    pub fn comparison(&self) -> Option<&RegimeComparison> {
        match self {
            Self::Success(comparison) => Some(comparison),
            Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn error_serializes_with_status_tag() {
        let result = TaxResult::error("annual salary is required");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "annual salary is required");
    }

    #[test]
    fn error_carries_no_regime_results() {
        let result = TaxResult::error("bad input");

        assert!(!result.is_success());
        assert_eq!(result.comparison(), None);
    }
}
