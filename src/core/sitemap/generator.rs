use crate::core::sitemap::catalog::{group_by_category, parse_tools};
use crate::core::sitemap::xml::{render_sitemap_index, render_urlset};
use crate::core::sitemap::{current_date, MAIN_SITEMAP_FILE, SITEMAP_INDEX_FILE};
use crate::domain::model::{SitemapUrl, Tool};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use std::collections::BTreeMap;

/// Static pages published in `sitemap-main.xml`: (path, changefreq, priority).
pub const MAIN_PAGES: [(&str, &str, &str); 10] = [
    ("/", "daily", "1.0"),
    ("/about-us", "monthly", "0.8"),
    ("/contact-us", "monthly", "0.8"),
    ("/privacy-policy", "yearly", "0.5"),
    ("/terms-of-service", "yearly", "0.5"),
    ("/help-center", "monthly", "0.7"),
    ("/all-tools", "weekly", "0.9"),
    ("/finance-tools", "weekly", "0.9"),
    ("/health-tools", "weekly", "0.9"),
    ("/text-tools", "weekly", "0.9"),
];

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Written file names, index last.
    pub files: Vec<String>,
    pub tools_per_category: BTreeMap<String, usize>,
}

impl GenerationReport {
    pub fn total_tools(&self) -> usize {
        self.tools_per_category.values().sum()
    }
}

pub fn category_file_name(category: &str) -> String {
    format!("sitemap-{}.xml", category)
}

/// Builds per-category sitemaps, the static-page sitemap and the index from
/// the tool catalog.
pub struct SitemapGenerator<S: Storage> {
    storage: S,
    base_url: String,
    current_date: String,
}

impl<S: Storage> SitemapGenerator<S> {
    pub fn new(storage: S, base_url: &str) -> Self {
        Self {
            storage,
            base_url: base_url.trim_end_matches('/').to_string(),
            current_date: current_date(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.current_date = date.into();
        self
    }

    fn tool_urls(&self, tools: &[Tool]) -> Vec<SitemapUrl> {
        tools
            .iter()
            .map(|tool| SitemapUrl {
                loc: tool.url.clone(),
                lastmod: self.current_date.clone(),
                changefreq: "weekly".to_string(),
                priority: "0.8".to_string(),
            })
            .collect()
    }

    fn main_urls(&self) -> Vec<SitemapUrl> {
        MAIN_PAGES
            .iter()
            .map(|(path, changefreq, priority)| SitemapUrl {
                loc: format!("{}{}", self.base_url, path),
                lastmod: self.current_date.clone(),
                changefreq: changefreq.to_string(),
                priority: priority.to_string(),
            })
            .collect()
    }

    pub async fn generate(&self, catalog_source: &str) -> Result<GenerationReport> {
        tracing::info!(
            "Generating sitemaps for {} (date {})",
            self.base_url,
            self.current_date
        );

        let tools = parse_tools(catalog_source, &self.base_url)?;
        if tools.is_empty() {
            return Err(ToolError::ProcessingError {
                message: "No tools found in the catalog".to_string(),
            });
        }

        let grouped = group_by_category(tools);
        let mut report = GenerationReport::default();

        for (category, tools) in &grouped {
            let file_name = category_file_name(category);
            let document = render_urlset(&self.tool_urls(tools));
            self.storage.write_file(&file_name, document.as_bytes()).await?;
            tracing::info!("Created {} with {} URLs", file_name, tools.len());

            report.tools_per_category.insert(category.clone(), tools.len());
            report.files.push(file_name);
        }

        let main = render_urlset(&self.main_urls());
        self.storage.write_file(MAIN_SITEMAP_FILE, main.as_bytes()).await?;
        tracing::info!("Created {} with {} URLs", MAIN_SITEMAP_FILE, MAIN_PAGES.len());
        report.files.push(MAIN_SITEMAP_FILE.to_string());

        // BTreeMap keys are already sorted.
        let mut entries = vec![(
            format!("{}/{}", self.base_url, MAIN_SITEMAP_FILE),
            self.current_date.clone(),
        )];
        entries.extend(grouped.keys().map(|category| {
            (
                format!("{}/{}", self.base_url, category_file_name(category)),
                self.current_date.clone(),
            )
        }));
        let index = render_sitemap_index(&entries);
        self.storage.write_file(SITEMAP_INDEX_FILE, index.as_bytes()).await?;
        tracing::info!(
            "Created {} index file with {} sitemaps",
            SITEMAP_INDEX_FILE,
            entries.len()
        );
        report.files.push(SITEMAP_INDEX_FILE.to_string());

        Ok(report)
    }
}
