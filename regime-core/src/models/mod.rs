mod age_category;
mod deduction;
mod form;
mod profile;
mod regime;
mod regime_result;
mod slab;
mod surcharge;
mod tax_result;

pub use age_category::AgeCategory;
pub use deduction::DeductionClaims;
pub use form::{FormValue, TaxForm};
pub use profile::TaxpayerProfile;
pub use regime::Regime;
pub use regime_result::{RegimeResult, TaxBreakdown};
pub use slab::{SlabSchedule, SlabScheduleError, TaxSlab};
pub use surcharge::{SurchargeSchedule, SurchargeScheduleError, SurchargeTier};
pub use tax_result::{RegimeComparison, TaxResult};
