use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AgeCategory, DeductionClaims};

/// Validated calculation input.
///
/// Produced by [`crate::validate::validate`] from a raw
/// [`TaxForm`](crate::models::TaxForm): amounts are non-negative decimals and
/// the age category is a recognized band. Regime calculators trust a profile
/// without re-checking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    pub annual_salary: Decimal,
    pub age_category: AgeCategory,
    pub is_salaried: bool,
    pub professional_tax: Decimal,
    pub deductions: DeductionClaims,
}
