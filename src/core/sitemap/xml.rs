//! Minimal sitemap protocol documents: `urlset`, `sitemapindex`, and a
//! tolerant reader for existing `urlset` files.

use crate::domain::model::SitemapUrl;
use crate::utils::error::{Result, ToolError};
use regex::Regex;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub fn render_urlset(urls: &[SitemapUrl]) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    for url in urls {
        out.push_str("  <url>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape(&url.loc)));
        out.push_str(&format!("    <lastmod>{}</lastmod>\n", escape(&url.lastmod)));
        out.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape(&url.changefreq)
        ));
        out.push_str(&format!("    <priority>{}</priority>\n", escape(&url.priority)));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

/// `entries` are `(loc, lastmod)` pairs in output order.
pub fn render_sitemap_index(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    for (loc, lastmod) in entries {
        out.push_str("  <sitemap>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape(loc)));
        out.push_str(&format!("    <lastmod>{}</lastmod>\n", escape(lastmod)));
        out.push_str("  </sitemap>\n");
    }
    out.push_str("</sitemapindex>\n");
    out
}

fn element_text(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str().trim()))
        .filter(|text| !text.is_empty())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ToolError::ProcessingError {
        message: format!("invalid sitemap pattern: {}", e),
    })
}

/// Checks that the document has a single root element that is closed at the
/// end of the text, after an optional declaration and leading comments.
fn ensure_document_shape(document: &str) -> Result<()> {
    let root_re = compile(r"(?s)^\s*(?:<\?xml[^>]*\?>\s*)?(?:<!--.*?-->\s*)*<([\w:.-]+)")?;
    let malformed = |reason: &str| ToolError::ProcessingError {
        message: format!("malformed sitemap document: {}", reason),
    };

    let root = root_re
        .captures(document.trim_start_matches('\u{feff}'))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| malformed("no root element"))?;

    let tail = document.trim_end();
    if tail.ends_with(&format!("</{}>", root)) || tail.ends_with("/>") {
        Ok(())
    } else {
        Err(malformed(&format!("<{}> is never closed", root)))
    }
}

/// Reads every `<url>` entry that has a `<loc>`. Missing optional elements
/// fall back to `default_date`, `weekly` and `0.8`. Fails when the document
/// is not well formed.
pub fn parse_urlset(document: &str, default_date: &str) -> Result<Vec<SitemapUrl>> {
    ensure_document_shape(document)?;

    // Namespace prefixes such as `<ns0:url>` are accepted.
    let url_re = compile(r"(?s)<(?:\w+:)?url\b[^>]*>(.*?)</(?:\w+:)?url>")?;
    let loc_re = compile(r"(?s)<(?:\w+:)?loc>(.*?)</(?:\w+:)?loc>")?;
    let lastmod_re = compile(r"(?s)<(?:\w+:)?lastmod>(.*?)</(?:\w+:)?lastmod>")?;
    let changefreq_re = compile(r"(?s)<(?:\w+:)?changefreq>(.*?)</(?:\w+:)?changefreq>")?;
    let priority_re = compile(r"(?s)<(?:\w+:)?priority>(.*?)</(?:\w+:)?priority>")?;

    let urls = url_re
        .captures_iter(document)
        .filter_map(|caps| {
            let block = caps.get(1)?.as_str();
            let loc = element_text(&loc_re, block)?;
            Some(SitemapUrl {
                loc,
                lastmod: element_text(&lastmod_re, block)
                    .unwrap_or_else(|| default_date.to_string()),
                changefreq: element_text(&changefreq_re, block)
                    .unwrap_or_else(|| "weekly".to_string()),
                priority: element_text(&priority_re, block).unwrap_or_else(|| "0.8".to_string()),
            })
        })
        .collect();

    Ok(urls)
}
