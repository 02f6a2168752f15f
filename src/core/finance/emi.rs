use crate::core::finance::currency::round_cents;
use crate::core::finance::{growth_factor, MAX_MONTHS};
use crate::domain::model::{AmortizationRow, EmiResult, LoanInput};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_negative, validate_positive_amount};
use std::io::Write;

fn validate_loan(input: &LoanInput) -> Result<()> {
    validate_positive_amount("principal", input.principal)?;
    validate_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    if input.months() == 0 {
        return Err(ToolError::invalid_input("tenure", "Tenure must be at least one month"));
    }
    if input.months() > MAX_MONTHS {
        return Err(ToolError::invalid_input(
            "tenure",
            format!("Tenure must not exceed {} months", MAX_MONTHS),
        ));
    }
    Ok(())
}

/// Unrounded monthly instalment for `months` payments at `monthly_rate`.
fn raw_emi(principal: f64, monthly_rate: f64, months: u32) -> Result<f64> {
    if monthly_rate == 0.0 {
        return Ok(principal / months as f64);
    }
    let growth = growth_factor("tenure", monthly_rate, months)?;
    Ok(principal * monthly_rate * growth / (growth - 1.0))
}

pub fn calculate_emi(input: &LoanInput) -> Result<EmiResult> {
    validate_loan(input)?;

    let months = input.months();
    let monthly_rate = input.annual_rate_percent / 12.0 / 100.0;
    let emi = raw_emi(input.principal, monthly_rate, months)?;

    let (total_amount, total_interest) = if monthly_rate == 0.0 {
        (input.principal, 0.0)
    } else {
        let total = emi * months as f64;
        (total, total - input.principal)
    };

    let interest_percentage = if total_amount > 0.0 {
        total_interest / total_amount * 100.0
    } else {
        0.0
    };

    tracing::debug!(
        principal = input.principal,
        monthly_rate,
        months,
        emi,
        "Calculated EMI"
    );

    Ok(EmiResult {
        emi: round_cents(emi),
        total_amount: round_cents(total_amount),
        total_interest: round_cents(total_interest),
        principal_amount: round_cents(input.principal),
        interest_percentage: round_cents(interest_percentage),
        months,
    })
}

/// Month-by-month split of each instalment into interest and principal.
/// The final payment absorbs rounding drift so the closing balance is zero.
pub fn amortization_schedule(input: &LoanInput) -> Result<Vec<AmortizationRow>> {
    validate_loan(input)?;

    let months = input.months();
    let monthly_rate = input.annual_rate_percent / 12.0 / 100.0;
    let emi = raw_emi(input.principal, monthly_rate, months)?;

    let mut balance = input.principal;
    let mut rows = Vec::with_capacity(months as usize);
    for month in 1..=months {
        let interest = balance * monthly_rate;
        let (payment, principal_paid) = if month == months {
            (balance + interest, balance)
        } else {
            (emi, emi - interest)
        };
        balance = (balance - principal_paid).max(0.0);

        rows.push(AmortizationRow {
            month,
            payment: round_cents(payment),
            principal: round_cents(principal_paid),
            interest: round_cents(interest),
            balance: round_cents(balance),
        });
    }

    Ok(rows)
}

pub fn write_schedule_csv<W: Write>(rows: &[AmortizationRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
