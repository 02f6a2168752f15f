//! Plain-text result panels for the calculators.

use crate::core::finance::format_currency;
use crate::domain::model::{
    CompoundResult, Currency, EmiResult, PageInfo, RetirementResult, SmokingResult,
};

fn line(label: &str, value: String) -> String {
    format!("{:<24}{}", label, value)
}

pub fn render_emi(result: &EmiResult, currency: Currency) -> String {
    [
        line("Monthly EMI:", format_currency(result.emi, currency)),
        line("Principal amount:", format_currency(result.principal_amount, currency)),
        line("Total interest:", format_currency(result.total_interest, currency)),
        line("Total amount:", format_currency(result.total_amount, currency)),
        line("Interest share:", format!("{:.2}%", result.interest_percentage)),
        line("Payments:", result.months.to_string()),
    ]
    .join("\n")
}

pub fn render_retirement(result: &RetirementResult, currency: Currency) -> String {
    [
        line("Years to retirement:", result.years_to_retirement.to_string()),
        line("Projected savings:", format_currency(result.future_value, currency)),
        line("Total contributions:", format_currency(result.total_contributions, currency)),
        line("Investment growth:", format_currency(result.total_growth, currency)),
        line("Annual income:", format_currency(result.annual_income, currency)),
        line("Monthly income:", format_currency(result.monthly_income, currency)),
        line(
            "In today's money:",
            format_currency(result.inflation_adjusted_value, currency),
        ),
    ]
    .join("\n")
}

pub fn render_smoking(result: &SmokingResult, currency: Currency) -> String {
    [
        line("Per day:", format_currency(result.daily, currency)),
        line("Per week:", format_currency(result.weekly, currency)),
        line("Per month:", format_currency(result.monthly, currency)),
        line("Per year:", format_currency(result.yearly, currency)),
        line("Over the period:", format_currency(result.total, currency)),
        line("If invested:", format_currency(result.invested_value, currency)),
    ]
    .join("\n")
}

pub fn render_compound(result: &CompoundResult, currency: Currency) -> String {
    [
        line("Final amount:", format_currency(result.final_amount, currency)),
        line("Interest earned:", format_currency(result.total_interest, currency)),
        line(
            "Effective annual rate:",
            format!("{:.2}%", result.effective_annual_rate_percent),
        ),
    ]
    .join("\n")
}

pub fn render_page_info(info: &PageInfo) -> String {
    let mut lines = vec![line("Total pages:", info.total_pages.to_string())];
    for page in &info.pages {
        lines.push(format!(
            "  page {:>4}: {:.0} x {:.0} pt",
            page.page_number, page.width, page.height
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_emi_uses_selected_currency() {
        let result = EmiResult {
            emi: 2236.72,
            total_amount: 536_812.66,
            total_interest: 236_812.66,
            principal_amount: 300_000.0,
            interest_percentage: 44.11,
            months: 240,
        };

        let usd = render_emi(&result, Currency::Usd);
        assert!(usd.contains("$2,236.72"));
        assert!(usd.contains("44.11%"));

        let inr = render_emi(&result, Currency::Inr);
        assert!(inr.contains("₹5,36,812.66"));
    }
}
