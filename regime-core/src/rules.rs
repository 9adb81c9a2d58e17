//! Assessment-year rule tables.
//!
//! All tax-year-specific law lives here as data: slab schedules, surcharge
//! tiers, rebate rules, deduction caps. The evaluators in
//! [`crate::calculations`] carry no year-specific branches, so a future
//! assessment year is a new [`RuleSet`] value rather than new code. The set
//! this crate ships is FY 2025-26 (Budget 2025), exposed via
//! [`RuleSet::fy_2025_26`].

use std::sync::OnceLock;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::Overflow;
use crate::models::{
    AgeCategory, DeductionClaims, SlabSchedule, SlabScheduleError, SurchargeSchedule,
    SurchargeScheduleError, SurchargeTier, TaxSlab,
};

/// Wire keys for deduction sections, as submitted by tax forms.
pub const SECTION_80C: &str = "section_80c";
pub const SECTION_80CCC: &str = "section_80ccc";
pub const SECTION_80CCD1: &str = "section_80ccd1";
pub const SECTION_80CCD_1B: &str = "section_80ccd_1b";
pub const SECTION_80D: &str = "section_80d";
pub const SECTION_80E: &str = "section_80e";
pub const SECTION_80G: &str = "section_80g";
pub const SECTION_80TTA_TTB: &str = "section_80tta_ttb";
pub const SECTION_80DDB: &str = "section_80ddb";
pub const SECTION_80GG: &str = "section_80gg";
pub const SECTION_80U: &str = "section_80u";
/// Home-loan interest. Applied upstream as house-property loss, never
/// aggregated with the Chapter VI-A rules.
pub const SECTION_24B: &str = "section_24b";

/// One Chapter VI-A aggregation rule: the sections whose claims combine
/// under a single cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterViaRule {
    /// Statutory heading, for logs and documentation.
    pub heading: &'static str,
    pub sections: &'static [&'static str],
    /// `None` passes the combined claim through uncapped.
    pub cap: Option<Decimal>,
}

impl ChapterViaRule {
    /// Combined claim across this rule's sections, after the cap.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] when the combined claim runs past `Decimal`'s
    /// range; the sum happens before the cap applies.
    pub fn eligible_amount(&self, claims: &DeductionClaims) -> Result<Decimal, Overflow> {
        let combined = self
            .sections
            .iter()
            .try_fold(Decimal::ZERO, |total, section| {
                total.checked_add(claims.claimed(section))
            })
            .ok_or(Overflow {
                stage: "deductions",
            })?;
        Ok(match self.cap {
            Some(cap) => combined.min(cap),
            None => combined,
        })
    }
}

/// How much of the base tax a Section 87A rebate can wipe out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebateCap {
    /// The smaller of the base tax and this amount.
    UpTo(Decimal),
    /// The entire base tax; net tax becomes zero.
    EntireTax,
}

/// Section 87A rebate: a tax waiver for taxable incomes at or below the
/// ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebateRule {
    pub income_ceiling: Decimal,
    pub cap: RebateCap,
}

impl RebateRule {
    /// Rebate granted for the given taxable income and base tax.
    pub fn rebate_for(&self, taxable_income: Decimal, base_tax: Decimal) -> Decimal {
        if taxable_income > self.income_ceiling {
            return Decimal::ZERO;
        }
        match self.cap {
            RebateCap::UpTo(cap) => base_tax.min(cap),
            RebateCap::EntireTax => base_tax,
        }
    }
}

/// Old-regime rules: itemized deductions, age-dependent slabs, partial
/// rebate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldRegimeRules {
    /// Standard deduction for salaried taxpayers and pensioners.
    pub standard_deduction: Decimal,
    /// Section 16(iii) cap on the professional-tax deduction.
    pub professional_tax_cap: Decimal,
    /// Cap on house-property loss set off against salary (Section 24B
    /// interest).
    pub house_property_loss_cap: Decimal,
    pub rebate: RebateRule,
    pub slabs_below_60: SlabSchedule,
    pub slabs_60_to_80: SlabSchedule,
    pub slabs_above_80: SlabSchedule,
    pub surcharge: SurchargeSchedule,
    pub chapter_via: Vec<ChapterViaRule>,
}

impl OldRegimeRules {
    /// Slab schedule for the taxpayer's age band.
    pub fn slabs_for(&self, age_category: AgeCategory) -> &SlabSchedule {
        match age_category {
            AgeCategory::Below60 => &self.slabs_below_60,
            AgeCategory::SixtyToEighty => &self.slabs_60_to_80,
            AgeCategory::AboveEighty => &self.slabs_above_80,
        }
    }
}

/// New-regime rules: one slab schedule for all ages, full rebate below the
/// ceiling, no itemized deductions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegimeRules {
    /// Standard deduction for salaried taxpayers and pensioners.
    pub standard_deduction: Decimal,
    pub rebate: RebateRule,
    pub slabs: SlabSchedule,
    pub surcharge: SurchargeSchedule,
}

/// Errors raised when a rule set fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error(transparent)]
    Slabs(#[from] SlabScheduleError),

    #[error(transparent)]
    Surcharge(#[from] SurchargeScheduleError),

    #[error("cess rate {0} outside [0, 1]")]
    CessRateOutOfRange(Decimal),
}

/// A complete assessment-year rule set covering both regimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Human-readable description of the rules, surfaced to callers as
    /// `calculation_assumptions`.
    pub assumptions: String,
    /// Health and education cess rate, applied on tax plus surcharge.
    pub cess_rate: Decimal,
    pub old_regime: OldRegimeRules,
    pub new_regime: NewRegimeRules,
}

impl RuleSet {
    /// The FY 2025-26 rule set per Budget 2025.
    ///
    /// Old regime: ₹50,000 standard deduction, 87A rebate of up to ₹12,500
    /// at taxable incomes ≤ ₹5,00,000, surcharge tiers to 37%. New regime:
    /// ₹75,000 standard deduction, full 87A rebate at taxable incomes
    /// ≤ ₹12,00,000, surcharge capped at 25%.
    pub fn fy_2025_26() -> &'static RuleSet {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(|| RuleSet {
            assumptions: "FY 2025-26 rules (Budget 2025)".to_string(),
            cess_rate: pct(4),
            old_regime: OldRegimeRules {
                standard_deduction: rupees(50_000),
                professional_tax_cap: rupees(2_500),
                house_property_loss_cap: rupees(200_000),
                rebate: RebateRule {
                    income_ceiling: rupees(500_000),
                    cap: RebateCap::UpTo(rupees(12_500)),
                },
                slabs_below_60: SlabSchedule::new(vec![
                    slab(250_000, 0),
                    slab(500_000, 5),
                    slab(1_000_000, 20),
                    open_slab(30),
                ]),
                slabs_60_to_80: SlabSchedule::new(vec![
                    slab(300_000, 0),
                    slab(500_000, 5),
                    slab(1_000_000, 20),
                    open_slab(30),
                ]),
                slabs_above_80: SlabSchedule::new(vec![
                    slab(500_000, 0),
                    slab(1_000_000, 20),
                    open_slab(30),
                ]),
                surcharge: SurchargeSchedule::new(vec![
                    tier(5_000_000, 10),
                    tier(10_000_000, 15),
                    tier(20_000_000, 25),
                    tier(50_000_000, 37),
                ]),
                chapter_via: vec![
                    ChapterViaRule {
                        heading: "80C/80CCC/80CCD(1)",
                        sections: &[SECTION_80C, SECTION_80CCC, SECTION_80CCD1],
                        cap: Some(rupees(150_000)),
                    },
                    ChapterViaRule {
                        heading: "80CCD(1B)",
                        sections: &[SECTION_80CCD_1B],
                        cap: Some(rupees(50_000)),
                    },
                    ChapterViaRule {
                        heading: "80D",
                        sections: &[SECTION_80D],
                        cap: Some(rupees(100_000)),
                    },
                    ChapterViaRule {
                        heading: "80E",
                        sections: &[SECTION_80E],
                        cap: None,
                    },
                    // 80G and 80GG pass through uncapped: the caller supplies
                    // the already-eligible amount. Donation-type percentages
                    // and the 80GG rent formula are not modeled.
                    ChapterViaRule {
                        heading: "80G",
                        sections: &[SECTION_80G],
                        cap: None,
                    },
                    ChapterViaRule {
                        heading: "80TTA/80TTB",
                        sections: &[SECTION_80TTA_TTB],
                        cap: Some(rupees(50_000)),
                    },
                    ChapterViaRule {
                        heading: "80DDB",
                        sections: &[SECTION_80DDB],
                        cap: Some(rupees(100_000)),
                    },
                    ChapterViaRule {
                        heading: "80U",
                        sections: &[SECTION_80U],
                        cap: Some(rupees(125_000)),
                    },
                    ChapterViaRule {
                        heading: "80GG",
                        sections: &[SECTION_80GG],
                        cap: None,
                    },
                ],
            },
            new_regime: NewRegimeRules {
                standard_deduction: rupees(75_000),
                rebate: RebateRule {
                    income_ceiling: rupees(1_200_000),
                    cap: RebateCap::EntireTax,
                },
                slabs: SlabSchedule::new(vec![
                    slab(400_000, 0),
                    slab(800_000, 5),
                    slab(1_200_000, 10),
                    slab(1_600_000, 15),
                    slab(2_000_000, 20),
                    slab(2_400_000, 25),
                    open_slab(30),
                ]),
                surcharge: SurchargeSchedule::new(vec![
                    tier(5_000_000, 10),
                    tier(10_000_000, 15),
                    tier(20_000_000, 25),
                ]),
            },
        })
    }

    /// Whether `section` participates in any rule of this set.
    pub fn recognizes(&self, section: &str) -> bool {
        section == SECTION_24B
            || self
                .old_regime
                .chapter_via
                .iter()
                .any(|rule| rule.sections.contains(&section))
    }

    /// Validates every schedule and rate in the set.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] if the cess rate falls outside [0, 1] or any
    /// slab or surcharge schedule fails its own validation.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(RuleSetError::CessRateOutOfRange(self.cess_rate));
        }
        self.old_regime
            .slabs_below_60
            .validate("old regime, below_60")?;
        self.old_regime
            .slabs_60_to_80
            .validate("old regime, 60_to_80")?;
        self.old_regime
            .slabs_above_80
            .validate("old regime, above_80")?;
        self.old_regime.surcharge.validate("old regime")?;
        self.new_regime.slabs.validate("new regime")?;
        self.new_regime.surcharge.validate("new regime")?;
        Ok(())
    }
}

fn rupees(amount: i64) -> Decimal {
    Decimal::from(amount)
}

/// A whole-percent rate as a fraction (`pct(5)` = 0.05).
fn pct(rate: i64) -> Decimal {
    Decimal::new(rate, 2)
}

fn slab(upper_bound: i64, rate: i64) -> TaxSlab {
    TaxSlab {
        upper_bound: Some(rupees(upper_bound)),
        rate: pct(rate),
    }
}

fn open_slab(rate: i64) -> TaxSlab {
    TaxSlab {
        upper_bound: None,
        rate: pct(rate),
    }
}

fn tier(threshold: i64, rate: i64) -> SurchargeTier {
    SurchargeTier {
        threshold: rupees(threshold),
        rate: pct(rate),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn shipped_rule_set_passes_validation() {
        assert_eq!(RuleSet::fy_2025_26().validate(), Ok(()));
    }

    #[test]
    fn fy_2025_26_returns_same_instance() {
        let first = RuleSet::fy_2025_26();
        let second = RuleSet::fy_2025_26();

        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn old_regime_exemption_limit_rises_with_age() {
        let rules = &RuleSet::fy_2025_26().old_regime;

        let first_bound = |schedule: &SlabSchedule| schedule.slabs[0].upper_bound.unwrap();

        assert_eq!(first_bound(&rules.slabs_below_60), dec!(250000));
        assert_eq!(first_bound(&rules.slabs_60_to_80), dec!(300000));
        assert_eq!(first_bound(&rules.slabs_above_80), dec!(500000));
    }

    #[test]
    fn slabs_for_selects_age_band_schedule() {
        let rules = &RuleSet::fy_2025_26().old_regime;

        assert_eq!(
            rules.slabs_for(AgeCategory::AboveEighty),
            &rules.slabs_above_80
        );
    }

    #[test]
    fn new_regime_surcharge_has_no_37_percent_tier() {
        let tiers = &RuleSet::fy_2025_26().new_regime.surcharge.tiers;

        let top_rate = tiers.last().unwrap().rate;

        assert_eq!(top_rate, dec!(0.25));
    }

    #[test]
    fn recognizes_all_wire_sections() {
        let rules = RuleSet::fy_2025_26();

        for section in [
            SECTION_80C,
            SECTION_80CCC,
            SECTION_80CCD1,
            SECTION_80CCD_1B,
            SECTION_80D,
            SECTION_80E,
            SECTION_80G,
            SECTION_80TTA_TTB,
            SECTION_80DDB,
            SECTION_80GG,
            SECTION_80U,
            SECTION_24B,
        ] {
            assert!(rules.recognizes(section), "{section} not recognized");
        }
        assert!(!rules.recognizes("section_80x"));
    }

    #[test]
    fn eligible_amount_caps_combined_group_claim() {
        let rule = ChapterViaRule {
            heading: "80C/80CCC/80CCD(1)",
            sections: &[SECTION_80C, SECTION_80CCC, SECTION_80CCD1],
            cap: Some(dec!(150000)),
        };
        let claims = DeductionClaims::from([
            (SECTION_80C, dec!(100000)),
            (SECTION_80CCC, dec!(80000)),
        ]);

        assert_eq!(rule.eligible_amount(&claims), Ok(dec!(150000)));
    }

    #[test]
    fn eligible_amount_passes_uncapped_rule_through() {
        let rule = ChapterViaRule {
            heading: "80E",
            sections: &[SECTION_80E],
            cap: None,
        };
        let claims = DeductionClaims::from([(SECTION_80E, dec!(400000))]);

        assert_eq!(rule.eligible_amount(&claims), Ok(dec!(400000)));
    }

    #[test]
    fn eligible_amount_overflows_before_the_cap_applies() {
        let rule = ChapterViaRule {
            heading: "80C/80CCC/80CCD(1)",
            sections: &[SECTION_80C, SECTION_80CCC, SECTION_80CCD1],
            cap: Some(dec!(150000)),
        };
        let claims = DeductionClaims::from([
            (SECTION_80C, Decimal::MAX),
            (SECTION_80CCC, dec!(1)),
        ]);

        let result = rule.eligible_amount(&claims);

        assert_eq!(
            result,
            Err(Overflow {
                stage: "deductions"
            })
        );
    }

    #[test]
    fn rebate_up_to_caps_at_fixed_amount() {
        let rebate = RebateRule {
            income_ceiling: dec!(500000),
            cap: RebateCap::UpTo(dec!(12500)),
        };

        assert_eq!(rebate.rebate_for(dec!(400000), dec!(7500)), dec!(7500));
        assert_eq!(rebate.rebate_for(dec!(500000), dec!(12500)), dec!(12500));
        assert_eq!(rebate.rebate_for(dec!(500001), dec!(12500.05)), dec!(0));
    }

    #[test]
    fn rebate_entire_tax_wipes_out_base_tax() {
        let rebate = RebateRule {
            income_ceiling: dec!(1200000),
            cap: RebateCap::EntireTax,
        };

        assert_eq!(rebate.rebate_for(dec!(1200000), dec!(60000)), dec!(60000));
        assert_eq!(rebate.rebate_for(dec!(1200001), dec!(60000.15)), dec!(0));
    }

    #[test]
    fn validate_rejects_cess_rate_above_one() {
        let mut rules = RuleSet::fy_2025_26().clone();
        rules.cess_rate = dec!(1.5);

        assert_eq!(
            rules.validate(),
            Err(RuleSetError::CessRateOutOfRange(dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_broken_slab_schedule() {
        let mut rules = RuleSet::fy_2025_26().clone();
        rules.new_regime.slabs.slabs.clear();

        assert_eq!(
            rules.validate(),
            Err(RuleSetError::Slabs(SlabScheduleError::Empty(
                "new regime".to_string()
            )))
        );
    }
}
