use crate::core::sitemap::xml::{parse_urlset, render_sitemap_index, render_urlset};
use crate::core::sitemap::{current_date, SITEMAP_INDEX_FILE};
use crate::domain::model::SitemapUrl;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use regex::Regex;
use std::collections::BTreeMap;

const MAIN_PATTERNS: &[&str] = &[
    r"/$", r"/about", r"/contact", r"/privacy", r"/terms", r"/help", r"/tools$", r"/finance$",
    r"/health$", r"/text$", r"/pdf$",
];

const FINANCE_PATTERNS: &[&str] = &[
    r"loan.*calculator",
    r"mortgage.*calculator",
    r"emi.*calculator",
    r"compound.*interest",
    r"simple.*interest",
    r"roi.*calculator",
    r"tax.*calculator",
    r"salary.*calculator",
    r"tip.*calculator",
    r"inflation.*calculator",
    r"savings.*calculator",
    r"debt.*calculator",
    r"investment.*calculator",
    r"retirement.*calculator",
    r"sip.*calculator",
    r"break.*even",
    r"business.*loan",
    r"car.*loan",
    r"home.*loan",
    r"education.*loan",
    r"credit.*card",
    r"percentage.*calculator",
    r"discount.*calculator",
    r"vat.*calculator",
    r"gst.*calculator",
    r"paypal.*fee",
    r"lease.*calculator",
    r"stock.*profit",
    r"net.*worth",
];

const HEALTH_PATTERNS: &[&str] = &[
    r"bmi.*calculator",
    r"bmr.*calculator",
    r"calorie.*calculator",
    r"body.*fat",
    r"ideal.*weight",
    r"pregnancy.*calculator",
    r"water.*intake",
    r"protein.*calculator",
    r"carb.*calculator",
    r"keto.*calculator",
    r"fasting.*timer",
    r"step.*calorie",
    r"heart.*rate",
    r"blood.*pressure",
    r"sleep.*calculator",
    r"ovulation.*calculator",
    r"baby.*growth",
    r"tdee.*calculator",
    r"lean.*body",
    r"waist.*ratio",
    r"whr.*calculator",
    r"life.*expectancy",
    r"cholesterol.*calculator",
    r"running.*pace",
    r"cycling.*speed",
    r"swimming.*calorie",
    r"alcohol.*calorie",
    r"smoking.*cost",
];

const PDF_PATTERNS: &[&str] = &[
    r"merge.*pdf",
    r"split.*pdf",
    r"compress.*pdf",
    r"pdf.*compress",
    r"pdf.*merge",
    r"pdf.*split",
    r"pdf.*convert",
    r"convert.*pdf",
    r"pdf.*to.*image",
    r"image.*to.*pdf",
    r"pdf.*to.*word",
    r"word.*to.*pdf",
    r"pdf.*to.*excel",
    r"excel.*to.*pdf",
    r"pdf.*encrypt",
    r"encrypt.*pdf",
    r"pdf.*decrypt",
    r"decrypt.*pdf",
    r"pdf.*rotate",
    r"rotate.*pdf",
    r"pdf.*watermark",
    r"watermark.*pdf",
    r"pdf.*sign",
    r"sign.*pdf",
    r"pdf.*edit",
    r"edit.*pdf",
    r"unlock.*pdf",
    r"pdf.*background",
];

const TEXT_PATTERNS: &[&str] = &[
    r"word.*counter",
    r"character.*counter",
    r"sentence.*counter",
    r"paragraph.*counter",
    r"case.*converter",
    r"password.*generator",
    r"name.*generator",
    r"username.*generator",
    r"address.*generator",
    r"qr.*generator",
    r"font.*changer",
    r"reverse.*text",
    r"text.*to.*qr",
    r"qr.*to.*text",
    r"text.*to.*binary",
    r"binary.*to.*text",
    r"qr.*scanner",
    r"markdown.*to.*html",
    r"html.*to.*markdown",
    r"lorem.*ipsum",
    r"text.*encrypt",
    r"text.*decrypt",
    r"url.*encoder",
    r"url.*decoder",
    r"base64.*encode",
    r"base64.*decode",
];

pub const MAIN_CATEGORY: &str = "main";

pub struct CategoryRule {
    pub name: &'static str,
    pub file: &'static str,
    patterns: Vec<Regex>,
}

impl CategoryRule {
    fn new(name: &'static str, file: &'static str, patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){}", p)).map_err(|e| ToolError::ProcessingError {
                    message: format!("invalid category pattern '{}': {}", p, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name,
            file,
            patterns,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

/// Rules in index order. `main` comes first in the index but is matched last.
pub fn default_rules() -> Result<Vec<CategoryRule>> {
    Ok(vec![
        CategoryRule::new(MAIN_CATEGORY, "sitemap-main.xml", MAIN_PATTERNS)?,
        CategoryRule::new("finance", "sitemap-finance.xml", FINANCE_PATTERNS)?,
        CategoryRule::new("health", "sitemap-health.xml", HEALTH_PATTERNS)?,
        CategoryRule::new("pdf", "sitemap-pdf.xml", PDF_PATTERNS)?,
        CategoryRule::new("text", "sitemap-text.xml", TEXT_PATTERNS)?,
    ])
}

#[derive(Debug, Clone, Default)]
pub struct SplitReport {
    pub used_example_urls: bool,
    pub urls_per_category: BTreeMap<String, usize>,
    /// Written file names, index last.
    pub files: Vec<String>,
}

/// Splits one large sitemap into category sitemaps plus an index.
pub struct SitemapSplitter<S: Storage> {
    storage: S,
    base_url: String,
    current_date: String,
    rules: Vec<CategoryRule>,
}

impl<S: Storage> SitemapSplitter<S> {
    pub fn new(storage: S, base_url: &str) -> Result<Self> {
        Ok(Self {
            storage,
            base_url: base_url.trim_end_matches('/').to_string(),
            current_date: current_date(),
            rules: default_rules()?,
        })
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.current_date = date.into();
        self
    }

    pub fn categorize(&self, url: &str) -> &'static str {
        let path = url.replace(&self.base_url, "").to_lowercase();

        if let Some(rule) = self
            .rules
            .iter()
            .filter(|rule| rule.name != MAIN_CATEGORY)
            .find(|rule| rule.matches(&path))
        {
            return rule.name;
        }
        MAIN_CATEGORY
    }

    /// URL set used when there is no sitemap to split yet.
    pub fn example_urls(&self) -> Vec<SitemapUrl> {
        let pages: [(&str, &str, &str); 24] = [
            ("/", "daily", "1.0"),
            ("/about", "monthly", "0.8"),
            ("/contact", "monthly", "0.8"),
            ("/privacy", "yearly", "0.5"),
            ("/terms", "yearly", "0.5"),
            ("/help", "monthly", "0.7"),
            ("/tools", "weekly", "0.9"),
            ("/tools/loan-calculator", "weekly", "0.8"),
            ("/tools/mortgage-calculator", "weekly", "0.8"),
            ("/tools/emi-calculator", "weekly", "0.8"),
            ("/tools/compound-interest-calculator", "weekly", "0.8"),
            ("/tools/tax-calculator", "weekly", "0.8"),
            ("/tools/paypal-fee-calculator", "weekly", "0.8"),
            ("/tools/bmi-calculator", "weekly", "0.8"),
            ("/tools/bmr-calculator", "weekly", "0.8"),
            ("/tools/calorie-calculator", "weekly", "0.8"),
            ("/tools/body-fat-calculator", "weekly", "0.8"),
            ("/tools/word-counter", "weekly", "0.8"),
            ("/tools/character-counter", "weekly", "0.8"),
            ("/tools/case-converter", "weekly", "0.8"),
            ("/tools/password-generator", "weekly", "0.8"),
            ("/tools/merge-pdf", "weekly", "0.8"),
            ("/tools/split-pdf", "weekly", "0.8"),
            ("/tools/compress-pdf", "weekly", "0.8"),
        ];

        pages
            .iter()
            .map(|(path, changefreq, priority)| SitemapUrl {
                loc: format!("{}{}", self.base_url, path),
                lastmod: self.current_date.clone(),
                changefreq: changefreq.to_string(),
                priority: priority.to_string(),
            })
            .collect()
    }

    pub async fn split(&self, input_file: &str) -> Result<SplitReport> {
        let mut report = SplitReport::default();

        let urls = if self.storage.exists(input_file).await {
            let raw = self.storage.read_file(input_file).await?;
            let document = String::from_utf8_lossy(&raw);
            match parse_urlset(&document, &self.current_date) {
                Ok(urls) => {
                    tracing::info!("Parsed {} URLs from {}", urls.len(), input_file);
                    urls
                }
                Err(e) => {
                    tracing::warn!("Error parsing {}: {}, using example URLs", input_file, e);
                    report.used_example_urls = true;
                    self.example_urls()
                }
            }
        } else {
            tracing::warn!(
                "{} not found, using example URLs based on the site structure",
                input_file
            );
            report.used_example_urls = true;
            self.example_urls()
        };

        if urls.is_empty() {
            return Err(ToolError::ProcessingError {
                message: format!("No URLs found in {}", input_file),
            });
        }

        let mut buckets: BTreeMap<&'static str, Vec<SitemapUrl>> = BTreeMap::new();
        for url in urls {
            buckets.entry(self.categorize(&url.loc)).or_default().push(url);
        }

        let mut index_entries = Vec::new();
        for rule in &self.rules {
            let Some(urls) = buckets.get(rule.name) else {
                continue;
            };
            self.storage
                .write_file(rule.file, render_urlset(urls).as_bytes())
                .await?;
            tracing::info!("Created {} with {} URLs", rule.file, urls.len());

            report
                .urls_per_category
                .insert(rule.name.to_string(), urls.len());
            report.files.push(rule.file.to_string());
            index_entries.push((
                format!("{}/{}", self.base_url, rule.file),
                self.current_date.clone(),
            ));
        }

        let index = render_sitemap_index(&index_entries);
        self.storage
            .write_file(SITEMAP_INDEX_FILE, index.as_bytes())
            .await?;
        tracing::info!(
            "Created {} referencing {} category sitemaps",
            SITEMAP_INDEX_FILE,
            index_entries.len()
        );
        report.files.push(SITEMAP_INDEX_FILE.to_string());

        Ok(report)
    }
}
