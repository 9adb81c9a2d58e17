use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated deduction claims keyed by section code (e.g. `"section_80c"`).
///
/// Absent sections read as zero. Keys the active rule set does not recognize
/// are preserved but never contribute to eligible deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeductionClaims(BTreeMap<String, Decimal>);

impl DeductionClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount claimed under `section`; zero when the section is absent.
    pub fn claimed(&self, section: &str) -> Decimal {
        self.0.get(section).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn insert(&mut self, section: impl Into<String>, amount: Decimal) {
        self.0.insert(section.into(), amount);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(section, amount)| (section.as_str(), *amount))
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for DeductionClaims {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(section, amount)| (section.into(), amount))
                .collect(),
        )
    }
}

impl<S: Into<String>, const N: usize> From<[(S, Decimal); N]> for DeductionClaims {
    fn from(entries: [(S, Decimal); N]) -> Self {
        entries.into_iter().collect()
    }
}
