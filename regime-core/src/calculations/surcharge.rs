//! Surcharge tier selection and marginal relief.
//!
//! Surcharge applies above high-income thresholds as a percentage of the tax
//! after rebate. Marginal relief keeps the total of tax and surcharge from
//! growing faster than income does just past a threshold: a taxpayer earning
//! one rupee over a threshold never pays more than the taxpayer exactly at
//! it plus that rupee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{Overflow, clamp_non_negative};
use crate::calculations::slab_tax::slab_tax;
use crate::models::{SlabSchedule, SurchargeSchedule, SurchargeTier};

/// Surcharge decision for one liability computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeOutcome {
    /// Nominal rate of the applicable tier; zero when no tier applies.
    pub rate: Decimal,
    /// Surcharge payable, after marginal relief.
    pub amount: Decimal,
    /// Amount the naive surcharge was reduced by; zero when relief did not
    /// bind.
    pub marginal_relief: Decimal,
}

impl SurchargeOutcome {
    fn none() -> Self {
        Self {
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            marginal_relief: Decimal::ZERO,
        }
    }
}

/// Computes the surcharge on `tax_after_rebate`, applying marginal relief.
///
/// Tier selection takes the highest tier whose threshold the taxable income
/// strictly exceeds; income exactly at a threshold stays in the tier below.
/// With no tier exceeded there is no surcharge.
///
/// The relief cap prices a taxpayer at exactly the applicable threshold —
/// base tax via `relief_slabs`, surcharged at the rate of the tier below —
/// and allows at most one extra rupee of liability per rupee of income above
/// the threshold. `relief_slabs` must be the schedule the base tax was
/// computed under; in the old regime that schedule depends on the age band.
///
/// # Errors
///
/// Returns [`Overflow`] if a custom rule set drives the arithmetic past
/// `Decimal`'s range. The shipped FY 2025-26 tables cannot.
pub fn surcharge_with_relief(
    taxable_income: Decimal,
    tax_after_rebate: Decimal,
    schedule: &SurchargeSchedule,
    relief_slabs: &SlabSchedule,
) -> Result<SurchargeOutcome, Overflow> {
    let Some((tier_index, tier)) = applicable_tier(taxable_income, schedule) else {
        return Ok(SurchargeOutcome::none());
    };

    let naive = tax_after_rebate
        .checked_mul(tier.rate)
        .ok_or(Overflow { stage: "surcharge" })?;
    let naive_total = tax_after_rebate
        .checked_add(naive)
        .ok_or(Overflow { stage: "surcharge" })?;

    // Liability of a taxpayer at exactly the threshold, surcharged at the
    // rate of the tier below.
    let prev_rate = match tier_index {
        0 => Decimal::ZERO,
        below => schedule.tiers[below - 1].rate,
    };
    let tax_at_threshold = slab_tax(tier.threshold, relief_slabs);
    let total_at_threshold = tax_at_threshold
        .checked_mul(prev_rate)
        .and_then(|surcharge| tax_at_threshold.checked_add(surcharge))
        .ok_or(Overflow {
            stage: "marginal relief reference",
        })?;
    let max_allowed = total_at_threshold
        .checked_add(taxable_income - tier.threshold)
        .ok_or(Overflow {
            stage: "marginal relief reference",
        })?;

    if naive_total <= max_allowed {
        return Ok(SurchargeOutcome {
            rate: tier.rate,
            amount: naive,
            marginal_relief: Decimal::ZERO,
        });
    }

    let amount = clamp_non_negative(max_allowed - tax_after_rebate);
    let marginal_relief = naive - amount;
    debug!(
        taxable_income = %taxable_income,
        threshold = %tier.threshold,
        relief = %marginal_relief,
        "marginal relief capped the surcharge"
    );
    Ok(SurchargeOutcome {
        rate: tier.rate,
        amount,
        marginal_relief,
    })
}

/// The highest tier whose threshold `taxable_income` strictly exceeds.
fn applicable_tier(
    taxable_income: Decimal,
    schedule: &SurchargeSchedule,
) -> Option<(usize, &SurchargeTier)> {
    schedule
        .tiers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, tier)| taxable_income > tier.threshold)
}
