//! Closed-form calculators behind the finance and health tool pages.

pub mod compound;
pub mod currency;
pub mod emi;
pub mod retirement;
pub mod smoking;

pub use compound::calculate_compound;
pub use currency::{format_currency, round_cents};
pub use emi::{amortization_schedule, calculate_emi, write_schedule_csv};
pub use retirement::calculate_retirement;
pub use smoking::calculate_smoking_cost;

use crate::utils::error::{Result, ToolError};

/// Longest horizon any calculator accepts, in months (100 years).
pub const MAX_MONTHS: u32 = 1200;
pub const MAX_YEARS: u32 = MAX_MONTHS / 12;

/// Converts a span in years to months, rejecting spans past [`MAX_YEARS`].
pub(crate) fn months_in(field: &str, years: u32) -> Result<u32> {
    years
        .checked_mul(12)
        .filter(|months| *months <= MAX_MONTHS)
        .ok_or_else(|| {
            ToolError::invalid_input(
                field,
                format!("Time span must not exceed {} years", MAX_YEARS),
            )
        })
}

/// `(1 + rate)^periods` with the period count checked against `i32`.
pub(crate) fn growth_factor(field: &str, rate: f64, periods: u32) -> Result<f64> {
    let exponent = i32::try_from(periods).map_err(|_| {
        ToolError::invalid_input(field, format!("{} periods is out of range", periods))
    })?;
    Ok((1.0 + rate).powi(exponent))
}
