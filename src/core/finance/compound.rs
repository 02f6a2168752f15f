use crate::core::finance::currency::round_cents;
use crate::core::finance::MAX_YEARS;
use crate::domain::model::{CompoundInput, CompoundResult};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_positive_amount, validate_range};

pub fn calculate_compound(input: &CompoundInput) -> Result<CompoundResult> {
    validate_positive_amount("principal", input.principal)?;
    validate_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    validate_range("years", input.years, 0.0, MAX_YEARS as f64)?;

    let rate = input.annual_rate_percent / 100.0;
    let periods = input.frequency.periods_per_year() as f64;
    let per_period = 1.0 + rate / periods;

    let final_amount = input.principal * per_period.powf(periods * input.years);
    let effective = per_period.powf(periods) - 1.0;

    Ok(CompoundResult {
        final_amount: round_cents(final_amount),
        total_interest: round_cents(final_amount - input.principal),
        effective_annual_rate_percent: round_cents(effective * 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CompoundingFrequency;

    #[test]
    fn test_monthly_compounding() {
        let result = calculate_compound(&CompoundInput {
            principal: 10_000.0,
            annual_rate_percent: 7.0,
            years: 10.0,
            frequency: CompoundingFrequency::Monthly,
        })
        .unwrap();

        assert_eq!(result.final_amount, 20_096.61);
        assert_eq!(result.total_interest, 10_096.61);
        assert_eq!(result.effective_annual_rate_percent, 7.23);
    }

    #[test]
    fn test_annual_compounding_matches_simple_growth() {
        let result = calculate_compound(&CompoundInput {
            principal: 10_000.0,
            annual_rate_percent: 7.0,
            years: 10.0,
            frequency: CompoundingFrequency::Annually,
        })
        .unwrap();

        assert_eq!(result.final_amount, 19_671.51);
        assert_eq!(result.effective_annual_rate_percent, 7.0);
    }

    #[test]
    fn test_rejects_years_beyond_limit() {
        let result = calculate_compound(&CompoundInput {
            principal: 10_000.0,
            annual_rate_percent: 7.0,
            years: 1e12,
            frequency: CompoundingFrequency::Daily,
        });
        assert!(result.is_err());
    }
}
