use serde::{Deserialize, Serialize};

/// Taxpayer age band under Indian income tax law.
///
/// The old regime assigns a different slab schedule to each band (the basic
/// exemption limit rises with age); the new regime uses one schedule for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeCategory {
    #[serde(rename = "below_60")]
    Below60,
    #[serde(rename = "60_to_80")]
    SixtyToEighty,
    #[serde(rename = "above_80")]
    AboveEighty,
}

impl AgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below_60",
            Self::SixtyToEighty => "60_to_80",
            Self::AboveEighty => "above_80",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "below_60" => Some(Self::Below60),
            "60_to_80" => Some(Self::SixtyToEighty),
            "above_80" => Some(Self::AboveEighty),
            _ => None,
        }
    }
}
