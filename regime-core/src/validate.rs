//! Boundary validation and coercion.
//!
//! Forms arrive loosely typed: amounts as text with comma separators, flags
//! as checkbox values, everything optional. This module owns the single
//! coercion step that turns a [`TaxForm`] into a [`TaxpayerProfile`]; the
//! regime calculators never see raw form values. The first failure wins —
//! a rejected form produces no partial profile.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{AgeCategory, DeductionClaims, FormValue, TaxForm, TaxpayerProfile};
use crate::rules::RuleSet;

/// Reasons a form is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("annual salary is required")]
    MissingAnnualSalary,

    #[error("age category is required")]
    MissingAgeCategory,

    #[error("unrecognized age category '{0}'")]
    UnknownAgeCategory(String),

    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: String, value: String },

    #[error("{field}: amount {value} is negative")]
    NegativeAmount { field: String, value: Decimal },
}

/// Validates a raw form against a rule set, producing a profile the regime
/// calculators can trust.
///
/// Salary and age category are required; professional tax and deduction
/// values default to zero when absent or blank. Every supplied deduction
/// value is validated, including values under section codes the rule set
/// does not recognize — unknown sections are logged at debug level and
/// carried through, where they simply never match an aggregation rule.
///
/// # Errors
///
/// Returns [`ValidationError`] on the first missing required field,
/// unrecognized age category, non-numeric amount, or negative amount.
pub fn validate(form: &TaxForm, rules: &RuleSet) -> Result<TaxpayerProfile, ValidationError> {
    let annual_salary = match form.annual_salary.as_ref() {
        None => return Err(ValidationError::MissingAnnualSalary),
        Some(FormValue::Text(text)) if text.trim().is_empty() => {
            return Err(ValidationError::MissingAnnualSalary);
        }
        Some(value) => amount_of("annual_salary", value)?,
    };
    let age_category = age_category_of(form.age_category.as_ref())?;
    let is_salaried = truthy_flag(form.is_salaried.as_ref());
    let professional_tax = match form.professional_tax.as_ref() {
        None => Decimal::ZERO,
        Some(value) => amount_of("professional_tax", value)?,
    };

    let mut deductions = DeductionClaims::new();
    for (section, value) in &form.deductions {
        let amount = amount_of(section, value)?;
        if !rules.recognizes(section) {
            debug!(section = %section, "ignoring unrecognized deduction section");
        }
        deductions.insert(section.clone(), amount);
    }

    Ok(TaxpayerProfile {
        annual_salary,
        age_category,
        is_salaried,
        professional_tax,
        deductions,
    })
}

/// Coerces a checkbox-style flag.
///
/// Booleans pass through; the number 1 and the trimmed, case-insensitive
/// strings `"on"`, `"true"`, `"yes"` and `"1"` are true. Everything else,
/// including an absent value, is false — never an error.
pub fn truthy_flag(value: Option<&FormValue>) -> bool {
    match value {
        None => false,
        Some(FormValue::Flag(flag)) => *flag,
        Some(FormValue::Amount(amount)) => *amount == Decimal::ONE,
        Some(FormValue::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "yes" | "1"
        ),
    }
}

fn age_category_of(value: Option<&FormValue>) -> Result<AgeCategory, ValidationError> {
    let Some(value) = value else {
        return Err(ValidationError::MissingAgeCategory);
    };
    let text = match value {
        FormValue::Text(text) => text.trim(),
        other => return Err(ValidationError::UnknownAgeCategory(other.to_string())),
    };
    if text.is_empty() {
        return Err(ValidationError::MissingAgeCategory);
    }
    AgeCategory::parse(text).ok_or_else(|| ValidationError::UnknownAgeCategory(text.to_string()))
}

/// A non-negative amount from a loose value. Blank text is zero.
fn amount_of(field: &str, value: &FormValue) -> Result<Decimal, ValidationError> {
    let amount = match value {
        FormValue::Flag(_) => {
            return Err(ValidationError::NotANumber {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        FormValue::Amount(amount) => *amount,
        FormValue::Text(text) => parse_money_text(field, text)?,
    };
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value: amount,
        });
    }
    Ok(amount)
}

/// Parses money text: trims whitespace, strips comma separators
/// (`"1,50,000"`), treats blank as zero.
fn parse_money_text(field: &str, text: &str) -> Result<Decimal, ValidationError> {
    let normalized = text.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}
