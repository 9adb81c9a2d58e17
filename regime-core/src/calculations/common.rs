//! Shared helpers for the liability pipeline.

use rust_decimal::Decimal;
use thiserror::Error;

/// Arithmetic overflow guard for the additive pipeline stages.
///
/// `Decimal` holds 96 bits of mantissa; deduction claims near
/// `Decimal::MAX` overflow when summed, and a custom rule set with
/// extreme incomes can push the tax, surcharge and cess sums past it
/// too. Those stages use checked arithmetic and surface this error
/// instead of panicking.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("arithmetic overflow while computing {stage}")]
pub struct Overflow {
    pub stage: &'static str,
}

/// Clamps a value to zero when negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative(dec!(125000)), dec!(125000));
/// assert_eq!(clamp_non_negative(dec!(-125000)), dec!(0));
/// ```
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Rounds up to the next whole rupee.
///
/// Cess is levied in whole rupees, rounded up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::ceil_to_rupee;
///
/// assert_eq!(ceil_to_rupee(dec!(900)), dec!(900));
/// assert_eq!(ceil_to_rupee(dec!(900.004)), dec!(901));
/// ```
pub fn ceil_to_rupee(value: Decimal) -> Decimal {
    value.ceil()
}
