use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two mutually exclusive statutory computation schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Itemized deductions, age-dependent slabs, partial 87A rebate.
    Old,
    /// Minimal deductions, flatter slabs, full 87A rebate below the ceiling.
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
