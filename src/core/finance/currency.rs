//! Currency rendering for calculator results.
//!
//! Each [`Currency`] is tied to one locale, so the same code always renders
//! with the same symbol placement, separators and grouping. Amounts are
//! always shown with two fraction digits.

use crate::domain::model::Currency;

enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

struct LocaleStyle {
    prefix: &'static str,
    suffix: &'static str,
    group_separator: char,
    decimal_separator: char,
    grouping: Grouping,
}

fn style_for(currency: Currency) -> LocaleStyle {
    match currency {
        Currency::Usd | Currency::Cad | Currency::Aud => LocaleStyle {
            prefix: "$",
            suffix: "",
            group_separator: ',',
            decimal_separator: '.',
            grouping: Grouping::Thousands,
        },
        Currency::Eur => LocaleStyle {
            prefix: "",
            suffix: "\u{a0}€",
            group_separator: '.',
            decimal_separator: ',',
            grouping: Grouping::Thousands,
        },
        Currency::Gbp => LocaleStyle {
            prefix: "£",
            suffix: "",
            group_separator: ',',
            decimal_separator: '.',
            grouping: Grouping::Thousands,
        },
        Currency::Inr => LocaleStyle {
            prefix: "₹",
            suffix: "",
            group_separator: ',',
            decimal_separator: '.',
            grouping: Grouping::Indian,
        },
        Currency::Jpy => LocaleStyle {
            prefix: "￥",
            suffix: "",
            group_separator: ',',
            decimal_separator: '.',
            grouping: Grouping::Thousands,
        },
        Currency::Cny => LocaleStyle {
            prefix: "¥",
            suffix: "",
            group_separator: ',',
            decimal_separator: '.',
            grouping: Grouping::Thousands,
        },
        Currency::Brl => LocaleStyle {
            prefix: "R$\u{a0}",
            suffix: "",
            group_separator: '.',
            decimal_separator: ',',
            grouping: Grouping::Thousands,
        },
    }
}

/// Rounds half away from zero to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_currency(amount: f64, currency: Currency) -> String {
    let style = style_for(currency);
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let grouped = match style.grouping {
        Grouping::Thousands => group_digits(&whole, 3, 3, style.group_separator),
        Grouping::Indian => group_digits(&whole, 3, 2, style.group_separator),
    };

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}{}{:02}{}",
        sign, style.prefix, grouped, style.decimal_separator, fraction, style.suffix
    )
}

/// Groups `digits` from the right: the first group has `first` digits, every
/// following group has `rest`.
fn group_digits(digits: &str, first: usize, rest: usize, separator: char) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups: Vec<&str> = vec![tail];
    let mut remaining = head;
    while remaining.len() > rest {
        let (left, right) = remaining.split_at(remaining.len() - rest);
        groups.push(right);
        remaining = left;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(&separator.to_string())
}
