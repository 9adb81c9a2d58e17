//! New-regime liability assessment.
//!
//! The new regime trades itemized relief for flatter slabs: only the
//! standard deduction applies, one schedule covers all age bands, and the
//! 87A rebate wipes out the entire tax below its ceiling.

use rust_decimal::Decimal;

use crate::calculations::common::{Overflow, ceil_to_rupee, clamp_non_negative};
use crate::calculations::slab_tax::slab_tax;
use crate::calculations::surcharge::surcharge_with_relief;
use crate::models::{RegimeResult, TaxBreakdown, TaxpayerProfile};
use crate::rules::NewRegimeRules;

/// Calculator for the new regime.
#[derive(Debug, Clone)]
pub struct NewRegimeCalculator<'a> {
    rules: &'a NewRegimeRules,
    cess_rate: Decimal,
}

impl<'a> NewRegimeCalculator<'a> {
    pub fn new(rules: &'a NewRegimeRules, cess_rate: Decimal) -> Self {
        Self { rules, cess_rate }
    }

    /// Assesses the full new-regime liability for a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] only when a custom rule set pushes the additive
    /// stages past `Decimal`'s range; the shipped rule set cannot.
    pub fn assess(&self, profile: &TaxpayerProfile) -> Result<RegimeResult, Overflow> {
        // Standard deduction is the only income adjustment
        let standard_deduction = self.standard_deduction(profile.is_salaried);
        let taxable_income = clamp_non_negative(profile.annual_salary - standard_deduction);

        // Slab tax and 87A rebate
        let base_tax = slab_tax(taxable_income, &self.rules.slabs);
        let rebate = self.rules.rebate.rebate_for(taxable_income, base_tax);
        let tax_after_rebate = clamp_non_negative(base_tax - rebate);

        // Surcharge with marginal relief
        let surcharge = surcharge_with_relief(
            taxable_income,
            tax_after_rebate,
            &self.rules.surcharge,
            &self.rules.slabs,
        )?;

        // Cess and final liability
        let before_cess = tax_after_rebate.checked_add(surcharge.amount).ok_or(Overflow {
            stage: "new regime liability",
        })?;
        let cess = ceil_to_rupee(
            before_cess
                .checked_mul(self.cess_rate)
                .ok_or(Overflow { stage: "cess" })?,
        );
        let tax_liability = before_cess.checked_add(cess).ok_or(Overflow {
            stage: "new regime liability",
        })?;

        Ok(RegimeResult {
            gross_income: profile.annual_salary,
            standard_deduction,
            professional_tax: None,
            house_property_loss: None,
            chapter_via_deductions: None,
            gross_total_income: None,
            taxable_income,
            base_tax,
            rebate_amount: rebate,
            surcharge: surcharge.amount,
            cess,
            tax_liability,
            breakdown: TaxBreakdown {
                base_tax,
                rebate,
                surcharge: surcharge.amount,
                cess,
            },
        })
    }

    fn standard_deduction(&self, is_salaried: bool) -> Decimal {
        if is_salaried {
            self.rules.standard_deduction
        } else {
            Decimal::ZERO
        }
    }
}
