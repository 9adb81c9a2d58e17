//! Chapter VI-A deduction aggregation (old regime only).

use rust_decimal::Decimal;

use crate::calculations::common::Overflow;
use crate::models::DeductionClaims;
use crate::rules::ChapterViaRule;

/// Total eligible Chapter VI-A deduction across the rule table.
///
/// Every rule caps its own section group independently before the capped
/// amounts are summed; a claim above its cap contributes exactly the cap.
/// Missing sections read as zero, and sections no rule names contribute
/// nothing. Negative claims are rejected upstream by validation and never
/// reach this function.
///
/// Section 24B is deliberately absent from the rule table: house-property
/// loss is set off against income before Chapter VI-A applies.
///
/// # Errors
///
/// Returns [`Overflow`] when the claimed amounts run past `Decimal`'s
/// range, inside one section group or across the uncapped groups.
pub fn eligible_deductions(
    claims: &DeductionClaims,
    rules: &[ChapterViaRule],
) -> Result<Decimal, Overflow> {
    rules.iter().try_fold(Decimal::ZERO, |total, rule| {
        let eligible = rule.eligible_amount(claims)?;
        total.checked_add(eligible).ok_or(Overflow {
            stage: "deductions",
        })
    })
}
