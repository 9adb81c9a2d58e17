//! Progressive slab tax evaluation.

use rust_decimal::Decimal;

use crate::calculations::common::clamp_non_negative;
use crate::models::SlabSchedule;

/// Computes progressive tax over a slab schedule.
///
/// Walks the slabs in ascending order keeping the previous slab's upper
/// bound; the income inside each slab is
/// `min(taxable_income, upper_bound) − previous_bound`, clamped to zero and
/// taxed at the slab's marginal rate. The walk stops as soon as no income
/// remains above the previous bound, so the open-ended top slab and
/// arbitrarily large incomes fall out of the same loop with no special case.
///
/// Pure function with no failure modes over a validated schedule. The
/// surcharge calculator reuses it to price the income at a marginal-relief
/// threshold.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::slab_tax;
/// use regime_core::rules::RuleSet;
///
/// let slabs = &RuleSet::fy_2025_26().new_regime.slabs;
///
/// // 4–8 lakh at 5% and 8–9.25 lakh at 10%.
/// assert_eq!(slab_tax(dec!(925000), slabs), dec!(32500));
/// ```
pub fn slab_tax(taxable_income: Decimal, schedule: &SlabSchedule) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;
    for slab in &schedule.slabs {
        if taxable_income <= previous_bound {
            break;
        }
        let ceiling = match slab.upper_bound {
            Some(bound) => taxable_income.min(bound),
            None => taxable_income,
        };
        let income_in_slab = clamp_non_negative(ceiling - previous_bound);
        tax += income_in_slab * slab.rate;
        if let Some(bound) = slab.upper_bound {
            previous_bound = bound;
        }
    }
    tax
}
