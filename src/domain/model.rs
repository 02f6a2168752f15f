use crate::utils::error::ToolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Years,
    Months,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure: u32,
    pub tenure_unit: TenureUnit,
}

impl LoanInput {
    pub fn months(&self) -> u32 {
        match self.tenure_unit {
            TenureUnit::Years => self.tenure.saturating_mul(12),
            TenureUnit::Months => self.tenure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub emi: f64,
    pub total_amount: f64,
    pub total_interest: f64,
    pub principal_amount: f64,
    pub interest_percentage: f64,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return_percent: f64,
    pub withdrawal_rate_percent: f64,
    pub inflation_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    pub inflation_adjusted_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokingInput {
    pub cigarettes_per_day: f64,
    pub pack_price: f64,
    pub cigarettes_per_pack: u32,
    pub years: u32,
    pub invest_return_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokingResult {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub total: f64,
    pub invested_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

impl FromStr for CompoundingFrequency {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annually" | "yearly" => Ok(CompoundingFrequency::Annually),
            "semiannually" | "semi-annually" | "half-yearly" => {
                Ok(CompoundingFrequency::SemiAnnually)
            }
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            "daily" => Ok(CompoundingFrequency::Daily),
            other => Err(ToolError::invalid_input(
                "frequency",
                format!("unknown compounding frequency '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    pub frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundResult {
    pub final_amount: f64,
    pub total_interest: f64,
    pub effective_annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Cad,
    Aud,
    Cny,
    Brl,
}

impl Currency {
    pub const ALL: [Currency; 9] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Cny,
        Currency::Brl,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Cny => "CNY",
            Currency::Brl => "BRL",
        }
    }

    /// BCP 47 tag the amount is rendered in.
    pub fn locale(self) -> &'static str {
        match self {
            Currency::Usd => "en-US",
            Currency::Eur => "de-DE",
            Currency::Gbp => "en-GB",
            Currency::Inr => "en-IN",
            Currency::Jpy => "ja-JP",
            Currency::Cad => "en-CA",
            Currency::Aud => "en-AU",
            Currency::Cny => "zh-CN",
            Currency::Brl => "pt-BR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or(ToolError::UnsupportedCurrency { code })
    }
}

#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSelection {
    #[default]
    All,
    Pages(Vec<u32>),
}

impl PageSelection {
    pub fn to_form_value(&self) -> String {
        match self {
            PageSelection::All => "all".to_string(),
            PageSelection::Pages(pages) => pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl FromStr for PageSelection {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut pages = Vec::new();
        for part in trimmed.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                if start > end {
                    return Err(ToolError::invalid_input(
                        "pages",
                        format!("range {} is reversed", part),
                    ));
                }
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part)?);
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

/// Highest page number a selection may name.
pub const MAX_PAGE_NUMBER: u32 = 10_000;

fn parse_page(raw: &str) -> Result<u32, ToolError> {
    match raw.trim().parse::<u32>() {
        Ok(page) if (1..=MAX_PAGE_NUMBER).contains(&page) => Ok(page),
        Ok(page) if page > MAX_PAGE_NUMBER => Err(ToolError::invalid_input(
            "pages",
            format!("page {} exceeds the limit of {}", page, MAX_PAGE_NUMBER),
        )),
        _ => Err(ToolError::invalid_input(
            "pages",
            format!("'{}' is not a page number (pages start at 1)", raw.trim()),
        )),
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundOptions {
    pub color: String,
    pub opacity: f64,
    pub pages: PageSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdvancedEditRequest {
    pub annotations: Vec<Annotation>,
    pub rotate_degrees: Option<i32>,
    pub encrypt_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDimensions {
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_pages: u32,
    #[serde(default)]
    pub pages: Vec<PageDimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub href: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}
