//! Old-regime liability assessment.
//!
//! The old regime allows itemized relief: the Section 16 standard deduction
//! and professional tax, house-property loss set-off (Section 24B interest),
//! and the Chapter VI-A deductions. Slab schedules depend on the taxpayer's
//! age band, and the 87A rebate is partial.

use rust_decimal::Decimal;

use crate::calculations::common::{Overflow, ceil_to_rupee, clamp_non_negative};
use crate::calculations::deductions::eligible_deductions;
use crate::calculations::slab_tax::slab_tax;
use crate::calculations::surcharge::surcharge_with_relief;
use crate::models::{RegimeResult, TaxBreakdown, TaxpayerProfile};
use crate::rules::{OldRegimeRules, SECTION_24B};

/// Calculator for the old regime.
#[derive(Debug, Clone)]
pub struct OldRegimeCalculator<'a> {
    rules: &'a OldRegimeRules,
    cess_rate: Decimal,
}

impl<'a> OldRegimeCalculator<'a> {
    pub fn new(rules: &'a OldRegimeRules, cess_rate: Decimal) -> Self {
        Self { rules, cess_rate }
    }

    /// Assesses the full old-regime liability for a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] when the additive stages run past `Decimal`'s
    /// range; with the shipped rule set that takes claim amounts near
    /// `Decimal::MAX`.
    pub fn assess(&self, profile: &TaxpayerProfile) -> Result<RegimeResult, Overflow> {
        // Section 16 and house-property adjustments
        let standard_deduction = self.standard_deduction(profile.is_salaried);
        let professional_tax = self.professional_tax(profile.professional_tax);
        let house_property_loss =
            self.house_property_loss(profile.deductions.claimed(SECTION_24B));
        let gross_total_income = self.gross_total_income(
            profile.annual_salary,
            standard_deduction,
            professional_tax,
            house_property_loss,
        );

        // Chapter VI-A
        let chapter_via = eligible_deductions(&profile.deductions, &self.rules.chapter_via)?;
        let taxable_income = clamp_non_negative(gross_total_income - chapter_via);

        // Slab tax and 87A rebate
        let slabs = self.rules.slabs_for(profile.age_category);
        let base_tax = slab_tax(taxable_income, slabs);
        let rebate = self.rules.rebate.rebate_for(taxable_income, base_tax);
        let tax_after_rebate = clamp_non_negative(base_tax - rebate);

        // Surcharge with marginal relief, against the age band's schedule
        let surcharge =
            surcharge_with_relief(taxable_income, tax_after_rebate, &self.rules.surcharge, slabs)?;

        // Cess and final liability
        let before_cess = tax_after_rebate.checked_add(surcharge.amount).ok_or(Overflow {
            stage: "old regime liability",
        })?;
        let cess = ceil_to_rupee(
            before_cess
                .checked_mul(self.cess_rate)
                .ok_or(Overflow { stage: "cess" })?,
        );
        let tax_liability = before_cess.checked_add(cess).ok_or(Overflow {
            stage: "old regime liability",
        })?;

        Ok(RegimeResult {
            gross_income: profile.annual_salary,
            standard_deduction,
            professional_tax: Some(professional_tax),
            house_property_loss: Some(house_property_loss),
            chapter_via_deductions: Some(chapter_via),
            gross_total_income: Some(gross_total_income),
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

    /// Professional-tax deduction, capped per Section 16(iii).
    fn professional_tax(&self, paid: Decimal) -> Decimal {
        paid.min(self.rules.professional_tax_cap)
    }

    /// House-property loss set off against salary: claimed 24B interest,
    /// capped.
    fn house_property_loss(&self, claimed_interest: Decimal) -> Decimal {
        claimed_interest.min(self.rules.house_property_loss_cap)
    }

    fn gross_total_income(
        &self,
        salary: Decimal,
        standard_deduction: Decimal,
        professional_tax: Decimal,
        house_property_loss: Decimal,
    ) -> Decimal {
        clamp_non_negative(salary - standard_deduction - professional_tax - house_property_loss)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{AgeCategory, DeductionClaims};
    use crate::rules::{RuleSet, SECTION_80C, SECTION_80E, SECTION_80G};

    fn calculator() -> OldRegimeCalculator<'static> {
        let rules = RuleSet::fy_2025_26();
        OldRegimeCalculator::new(&rules.old_regime, rules.cess_rate)
    }

    fn salaried_profile(annual_salary: Decimal) -> TaxpayerProfile {
        TaxpayerProfile {
            annual_salary,
            age_category: AgeCategory::Below60,
            is_salaried: true,
            professional_tax: dec!(0),
            deductions: DeductionClaims::new(),
        }
    }

    // =========================================================================
    // per-line methods
    // =========================================================================

    #[test]
    fn standard_deduction_applies_to_salaried_only() {
        let calculator = calculator();

        assert_eq!(calculator.standard_deduction(true), dec!(50000));
        assert_eq!(calculator.standard_deduction(false), dec!(0));
    }

    #[test]
    fn professional_tax_caps_at_2500() {
        let calculator = calculator();

        assert_eq!(calculator.professional_tax(dec!(1800)), dec!(1800));
        assert_eq!(calculator.professional_tax(dec!(5000)), dec!(2500));
    }

    #[test]
    fn house_property_loss_caps_at_two_lakh() {
        let calculator = calculator();

        assert_eq!(calculator.house_property_loss(dec!(150000)), dec!(150000));
        assert_eq!(calculator.house_property_loss(dec!(300000)), dec!(200000));
    }

    #[test]
    fn gross_total_income_floors_at_zero() {
        let calculator = calculator();

        let result = calculator.gross_total_income(dec!(40000), dec!(50000), dec!(2500), dec!(0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // assess
    // =========================================================================

    #[test]
    fn assess_salaried_six_lakh_no_claims() {
        let result = calculator().assess(&salaried_profile(dec!(600000))).unwrap();

        assert_eq!(result.gross_income, dec!(600000));
        assert_eq!(result.standard_deduction, dec!(50000));
        assert_eq!(result.gross_total_income, Some(dec!(550000)));
        assert_eq!(result.taxable_income, dec!(550000));
        // 12,500 over the 5% band plus 50,000 × 0.20
        assert_eq!(result.base_tax, dec!(22500));
        assert_eq!(result.rebate_amount, dec!(0));
        assert_eq!(result.surcharge, dec!(0));
        assert_eq!(result.cess, dec!(900));
        assert_eq!(result.tax_liability, dec!(23400));
        assert_eq!(result.breakdown.base_tax, dec!(22500));
        assert_eq!(result.breakdown.cess, dec!(900));
    }

    #[test]
    fn assess_grants_rebate_at_or_below_five_lakh() {
        let result = calculator().assess(&salaried_profile(dec!(500000))).unwrap();

        // taxable 450,000, base 10,000, fully rebated
        assert_eq!(result.taxable_income, dec!(450000));
        assert_eq!(result.base_tax, dec!(10000));
        assert_eq!(result.rebate_amount, dec!(10000));
        assert_eq!(result.tax_liability, dec!(0));
    }

    #[test]
    fn assess_applies_chapter_via_caps() {
        let mut profile = salaried_profile(dec!(1000000));
        profile.deductions = DeductionClaims::from([(SECTION_80C, dec!(300000))]);

        let result = calculator().assess(&profile).unwrap();

        assert_eq!(result.chapter_via_deductions, Some(dec!(150000)));
        // GTI 950,000 − 150,000 = 800,000
        assert_eq!(result.taxable_income, dec!(800000));
        // 12,500 + 300,000 × 0.20
        assert_eq!(result.base_tax, dec!(72500));
        assert_eq!(result.cess, dec!(2900));
        assert_eq!(result.tax_liability, dec!(75400));
    }

    #[test]
    fn assess_sets_off_professional_tax_and_home_loan_interest() {
        let mut profile = salaried_profile(dec!(1000000));
        profile.professional_tax = dec!(5000);
        profile.deductions = DeductionClaims::from([("section_24b", dec!(300000))]);

        let result = calculator().assess(&profile).unwrap();

        assert_eq!(result.professional_tax, Some(dec!(2500)));
        assert_eq!(result.house_property_loss, Some(dec!(200000)));
        // 1,000,000 − 50,000 − 2,500 − 200,000
        assert_eq!(result.gross_total_income, Some(dec!(747500)));
        assert_eq!(result.base_tax, dec!(62000));
        assert_eq!(result.tax_liability, dec!(64480));
    }

    #[test]
    fn assess_uses_senior_slab_schedule() {
        let mut profile = salaried_profile(dec!(600000));
        profile.age_category = AgeCategory::SixtyToEighty;

        let result = calculator().assess(&profile).unwrap();

        // nil to 300,000 for seniors: 10,000 + 10,000
        assert_eq!(result.base_tax, dec!(20000));
        assert_eq!(result.tax_liability, dec!(20800));
    }

    #[test]
    fn assess_uses_super_senior_slab_schedule() {
        let mut profile = salaried_profile(dec!(600000));
        profile.age_category = AgeCategory::AboveEighty;

        let result = calculator().assess(&profile).unwrap();

        // nil to 500,000: only 50,000 × 0.20
        assert_eq!(result.base_tax, dec!(10000));
        assert_eq!(result.tax_liability, dec!(10400));
    }

    #[test]
    fn assess_non_salaried_gets_no_standard_deduction() {
        let mut profile = salaried_profile(dec!(600000));
        profile.is_salaried = false;

        let result = calculator().assess(&profile).unwrap();

        assert_eq!(result.standard_deduction, dec!(0));
        assert_eq!(result.taxable_income, dec!(600000));
    }

    #[test]
    fn assess_applies_surcharge_with_marginal_relief() {
        let result = calculator().assess(&salaried_profile(dec!(5150000))).unwrap();

        // taxable 5,100,000, base 1,342,500, naive surcharge 134,250 capped
        // by relief to 70,000
        assert_eq!(result.taxable_income, dec!(5100000));
        assert_eq!(result.base_tax, dec!(1342500));
        assert_eq!(result.surcharge, dec!(70000));
        assert_eq!(result.cess, dec!(56500));
        assert_eq!(result.tax_liability, dec!(1469000));
    }

    #[test]
    fn assess_zero_income_yields_zero_liability() {
        let result = calculator().assess(&salaried_profile(dec!(0))).unwrap();

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.tax_liability, dec!(0));
    }

    #[test]
    fn assess_populates_old_regime_detail_fields() {
        let result = calculator().assess(&salaried_profile(dec!(600000))).unwrap();

        assert_eq!(result.professional_tax, Some(dec!(0)));
        assert_eq!(result.house_property_loss, Some(dec!(0)));
        assert_eq!(result.chapter_via_deductions, Some(dec!(0)));
    }

    #[test]
    fn assess_reports_overflow_for_extreme_claims() {
        let mut profile = salaried_profile(dec!(1000000));
        profile.deductions = DeductionClaims::from([
            (SECTION_80E, Decimal::MAX),
            (SECTION_80G, dec!(1)),
        ]);

        let result = calculator().assess(&profile);

        assert_eq!(
            result,
            Err(Overflow {
                stage: "deductions"
            })
        );
    }
}
