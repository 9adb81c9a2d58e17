use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four components the final liability is assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub base_tax: Decimal,
    pub rebate: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
}

/// Full liability breakdown for one regime.
///
/// Produced fresh per calculation; carries no identity beyond the call that
/// created it. The optional fields describe old-regime income adjustments
/// (professional tax, house-property loss, Chapter VI-A) and are omitted from
/// the wire shape on the new-regime side, where they do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub gross_income: Decimal,
    pub standard_deduction: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_tax: Option<Decimal>,

    /// House-property loss actually applied (claimed 24B interest, capped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_property_loss: Option<Decimal>,

    /// Eligible Chapter VI-A deduction total actually applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_via_deductions: Option<Decimal>,

    /// Income after standard deduction, professional tax and house-property
    /// loss, before Chapter VI-A.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total_income: Option<Decimal>,

    pub taxable_income: Decimal,
    pub base_tax: Decimal,
    pub rebate_amount: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
    /// `base_tax − rebate_amount + surcharge + cess`.
    pub tax_liability: Decimal,
    pub breakdown: TaxBreakdown,
}
