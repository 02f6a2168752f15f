//! Sitemap publishing for the tool catalog.

pub mod catalog;
pub mod generator;
pub mod splitter;
pub mod xml;

pub use generator::{GenerationReport, SitemapGenerator};
pub use splitter::{SitemapSplitter, SplitReport};

pub const SITEMAP_INDEX_FILE: &str = "sitemap.xml";
pub const MAIN_SITEMAP_FILE: &str = "sitemap-main.xml";

/// `lastmod` value for entries written today.
pub fn current_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
