use crate::core::finance::currency::round_cents;
use crate::core::finance::months_in;
use crate::core::finance::retirement::annuity_future_value;
use crate::domain::model::{SmokingInput, SmokingResult};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_negative, validate_positive_amount};

pub fn calculate_smoking_cost(input: &SmokingInput) -> Result<SmokingResult> {
    validate_positive_amount("cigarettes_per_day", input.cigarettes_per_day)?;
    validate_positive_amount("pack_price", input.pack_price)?;
    validate_non_negative("invest_return_percent", input.invest_return_percent)?;
    if input.cigarettes_per_pack == 0 {
        return Err(ToolError::invalid_input(
            "cigarettes_per_pack",
            "A pack must contain at least one cigarette",
        ));
    }

    let months = months_in("years", input.years)?;

    let daily = input.cigarettes_per_day / input.cigarettes_per_pack as f64 * input.pack_price;
    let yearly = daily * 365.0;
    let monthly = yearly / 12.0;
    let total = yearly * input.years as f64;

    let monthly_rate = input.invest_return_percent / 100.0 / 12.0;
    let invested_value = annuity_future_value(monthly, monthly_rate, months)?;

    Ok(SmokingResult {
        daily: round_cents(daily),
        weekly: round_cents(daily * 7.0),
        monthly: round_cents(monthly),
        yearly: round_cents(yearly),
        total: round_cents(total),
        invested_value: round_cents(invested_value),
    })
}
