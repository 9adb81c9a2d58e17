pub mod calculations;
pub mod models;
pub mod rules;
pub mod validate;

mod calculator;

pub use calculator::{TaxCalculator, TaxError, calculate_tax};
pub use models::*;
