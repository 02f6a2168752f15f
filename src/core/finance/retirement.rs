use crate::core::finance::currency::round_cents;
use crate::core::finance::{growth_factor, months_in};
use crate::domain::model::{RetirementInput, RetirementResult};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_negative, validate_range};

/// Future value of a level monthly contribution. Falls back to the plain sum
/// when the rate is zero.
pub(crate) fn annuity_future_value(
    contribution: f64,
    monthly_rate: f64,
    months: u32,
) -> Result<f64> {
    if monthly_rate == 0.0 {
        return Ok(contribution * months as f64);
    }
    let growth = growth_factor("months", monthly_rate, months)?;
    Ok(contribution * (growth - 1.0) / monthly_rate)
}

pub fn calculate_retirement(input: &RetirementInput) -> Result<RetirementResult> {
    if input.retirement_age <= input.current_age {
        return Err(ToolError::invalid_input(
            "retirement_age",
            "Retirement age must be greater than current age",
        ));
    }
    validate_non_negative("current_savings", input.current_savings)?;
    validate_non_negative("monthly_contribution", input.monthly_contribution)?;
    validate_non_negative("annual_return_percent", input.annual_return_percent)?;
    validate_range("withdrawal_rate_percent", input.withdrawal_rate_percent, 0.0, 100.0)?;
    validate_non_negative("inflation_percent", input.inflation_percent)?;

    let years = input.retirement_age - input.current_age;
    let annual_rate = input.annual_return_percent / 100.0;
    let monthly_rate = annual_rate / 12.0;
    let months = months_in("retirement_age", years)?;

    let savings_growth =
        input.current_savings * growth_factor("retirement_age", annual_rate, years)?;
    let contribution_growth =
        annuity_future_value(input.monthly_contribution, monthly_rate, months)?;
    let future_value = savings_growth + contribution_growth;

    let total_contributions = input.current_savings + input.monthly_contribution * months as f64;
    let annual_income = future_value * input.withdrawal_rate_percent / 100.0;
    let inflation_adjusted_value =
        future_value / growth_factor("retirement_age", input.inflation_percent / 100.0, years)?;

    tracing::debug!(years, future_value, "Calculated retirement projection");

    Ok(RetirementResult {
        years_to_retirement: years,
        future_value: round_cents(future_value),
        total_contributions: round_cents(total_contributions),
        total_growth: round_cents(future_value - total_contributions),
        annual_income: round_cents(annual_income),
        monthly_income: round_cents(annual_income / 12.0),
        inflation_adjusted_value: round_cents(inflation_adjusted_value),
    })
}
