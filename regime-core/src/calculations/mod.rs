//! The liability pipeline.
//!
//! Leaf evaluators first: [`slab_tax`] walks a progressive schedule,
//! [`eligible_deductions`] aggregates capped Chapter VI-A claims, and
//! [`surcharge_with_relief`] picks the surcharge tier and applies marginal
//! relief (reusing [`slab_tax`] for the relief reference). The two regime
//! calculators compose them into full liability breakdowns.

pub mod common;
pub mod deductions;
pub mod new_regime;
pub mod old_regime;
pub mod slab_tax;
pub mod surcharge;

pub use common::Overflow;
pub use deductions::eligible_deductions;
pub use new_regime::NewRegimeCalculator;
pub use old_regime::OldRegimeCalculator;
pub use slab_tax::slab_tax;
pub use surcharge::{SurchargeOutcome, surcharge_with_relief};
