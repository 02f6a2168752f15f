use dapsi_tools::core::finance::{
    amortization_schedule, calculate_emi, calculate_retirement, format_currency,
};
use dapsi_tools::domain::model::{Currency, LoanInput, RetirementInput, TenureUnit};

fn loan(principal: f64, rate: f64, tenure: u32, unit: TenureUnit) -> LoanInput {
    LoanInput {
        principal,
        annual_rate_percent: rate,
        tenure,
        tenure_unit: unit,
    }
}

#[test]
fn test_emi_totals_hold_across_inputs() {
    let cases = [
        (300_000.0, 6.5, 20, TenureUnit::Years),
        (25_000.0, 11.0, 36, TenureUnit::Months),
        (4_500_000.0, 8.4, 15, TenureUnit::Years),
        (999.99, 0.01, 7, TenureUnit::Months),
    ];

    for (principal, rate, tenure, unit) in cases {
        let result = calculate_emi(&loan(principal, rate, tenure, unit)).unwrap();
        let n = result.months as f64;

        assert!(
            (result.emi * n - result.total_amount).abs() <= 0.005 * n + 0.01,
            "EMI x n drifted for {:?}",
            (principal, rate, tenure)
        );
        assert!((result.total_amount - principal - result.total_interest).abs() <= 0.01);
        assert!(result.total_interest > 0.0);
    }
}

#[test]
fn test_zero_rate_emi_is_exact_division() {
    let result = calculate_emi(&loan(10_000.0, 0.0, 3, TenureUnit::Years)).unwrap();

    assert_eq!(result.emi, dapsi_tools::core::finance::round_cents(10_000.0 / 36.0));
    assert_eq!(result.total_interest, 0.0);
    assert_eq!(result.total_amount, 10_000.0);
}

#[test]
fn test_schedule_interest_matches_emi_result() {
    let input = loan(300_000.0, 6.5, 20, TenureUnit::Years);
    let result = calculate_emi(&input).unwrap();
    let rows = amortization_schedule(&input).unwrap();

    let scheduled_interest: f64 = rows.iter().map(|r| r.interest).sum();
    assert!((scheduled_interest - result.total_interest).abs() < 1.0);
    assert_eq!(rows.last().unwrap().balance, 0.0);
}

#[test]
fn test_retirement_without_contributions_is_compound_growth() {
    let result = calculate_retirement(&RetirementInput {
        current_age: 25,
        retirement_age: 65,
        current_savings: 50_000.0,
        monthly_contribution: 0.0,
        annual_return_percent: 5.0,
        withdrawal_rate_percent: 4.0,
        inflation_percent: 2.0,
    })
    .unwrap();

    let expected = 50_000.0 * 1.05f64.powi(40);
    assert!((result.future_value - expected).abs() <= 0.006);
    assert!((result.annual_income - expected * 0.04).abs() <= 0.01);
}

#[test]
fn test_currency_selection_is_consistent() {
    let amount = 536_812.657;
    assert_eq!(format_currency(amount, Currency::Usd), "$536,812.66");
    assert_eq!(format_currency(amount, Currency::Inr), "₹5,36,812.66");
    assert_eq!(format_currency(amount, Currency::Eur), "536.812,66\u{a0}€");

    for currency in Currency::ALL {
        assert_eq!(
            format_currency(amount, currency),
            format_currency(amount, currency.code().parse().unwrap())
        );
    }
}
