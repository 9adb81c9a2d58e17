use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A loosely typed scalar as delivered by a form post, JSON body, or CSV
/// cell.
///
/// Boundary layers hand values through without interpreting them; coercion
/// into typed amounts and flags happens in [`crate::validate`]. Deserialization
/// tries boolean first, then number, then falls back to text, so `true`,
/// `150000` and `"1,50,000"` all arrive as the caller wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Amount(Decimal),
    Text(String),
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Decimal> for FormValue {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Raw calculation request, exactly as supplied by the caller.
///
/// Every field is optional and loosely typed. Unknown keys are collected into
/// `deductions`, so a flat form body like
/// `{"annual_salary": "1000000", "section_80c": "150000"}` deserializes
/// directly. [`crate::validate::validate`] turns a form into a
/// [`TaxpayerProfile`](crate::models::TaxpayerProfile) or explains why it
/// cannot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_salary: Option<FormValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: Option<FormValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_salaried: Option<FormValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_tax: Option<FormValue>,

    /// Claimed deduction amounts keyed by section code.
    #[serde(flatten)]
    pub deductions: BTreeMap<String, FormValue>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn deserializes_flat_form_body() {
        let form: TaxForm = serde_json::from_str(
            r#"{
                "annual_salary": "1000000",
                "age_category": "below_60",
                "is_salaried": "on",
                "section_80c": "1,50,000"
            }"#,
        )
        .unwrap();

        assert_eq!(form.annual_salary, Some(FormValue::Amount(dec!(1000000))));
        assert_eq!(form.age_category, Some(FormValue::Text("below_60".into())));
        assert_eq!(form.is_salaried, Some(FormValue::Text("on".into())));
        assert_eq!(
            form.deductions.get("section_80c"),
            Some(&FormValue::Text("1,50,000".into()))
        );
    }

    #[test]
    fn deserializes_typed_json_values() {
        let form: TaxForm = serde_json::from_str(
            r#"{"annual_salary": 1000000, "is_salaried": true, "section_80d": 25000}"#,
        )
        .unwrap();

        assert_eq!(form.annual_salary, Some(FormValue::Amount(dec!(1000000))));
        assert_eq!(form.is_salaried, Some(FormValue::Flag(true)));
        assert_eq!(
            form.deductions.get("section_80d"),
            Some(&FormValue::Amount(dec!(25000)))
        );
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let form: TaxForm = serde_json::from_str("{}").unwrap();

        assert_eq!(form, TaxForm::default());
    }

    #[test]
    fn form_value_displays_raw_content() {
        assert_eq!(FormValue::from(true).to_string(), "true");
        assert_eq!(FormValue::from(dec!(2500)).to_string(), "2500");
        assert_eq!(FormValue::from("60_to_80").to_string(), "60_to_80");
    }
}
