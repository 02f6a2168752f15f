pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{HttpPdfService, LocalStorage};
pub use crate::config::SiteConfig;
pub use crate::core::sitemap::{SitemapGenerator, SitemapSplitter};
pub use crate::utils::error::{Result, ToolError};
