use anyhow::Result;
use dapsi_tools::core::sitemap::xml::parse_urlset;
use dapsi_tools::{LocalStorage, SitemapGenerator, SitemapSplitter};
use tempfile::TempDir;

const CATALOG: &str = r#"
const toolsData = [
  { id: 'home-loan-calculator', name: 'Home Loan Calculator', description: 'EMI for home loans', category: 'finance', href: '/tools/home-loan-calculator' },
  { id: 'retirement-calculator', name: 'Retirement Calculator', description: 'Plan savings', category: 'finance', href: '/tools/retirement-calculator' },
  { id: 'smoking-cost-calculator', name: 'Smoking Cost Calculator', description: 'Cost of smoking', category: 'health', href: '/smoking' },
  { id: 'unlock-pdf', name: 'Unlock PDF', description: 'Remove a password', category: 'pdf', href: '/tools/unlock-pdf/' },
];
"#;

fn storage_in(dir: &TempDir) -> LocalStorage {
    LocalStorage::new(dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_generate_writes_category_main_and_index() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let generator =
        SitemapGenerator::new(storage_in(&temp_dir), "https://dapsiwow.com/").with_date("2026-10-19");

    let report = generator.generate(CATALOG).await?;

    assert_eq!(report.total_tools(), 4);
    assert_eq!(
        report.files,
        vec![
            "sitemap-finance.xml",
            "sitemap-health.xml",
            "sitemap-pdf.xml",
            "sitemap-main.xml",
            "sitemap.xml"
        ]
    );

    let finance = std::fs::read_to_string(temp_dir.path().join("sitemap-finance.xml"))?;
    let urls = parse_urlset(&finance, "unused")?;
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0].loc, "https://dapsiwow.com/tools/home-loan-calculator");
    assert_eq!(urls[0].lastmod, "2026-10-19");
    assert_eq!(urls[0].changefreq, "weekly");
    assert_eq!(urls[0].priority, "0.8");

    let health = std::fs::read_to_string(temp_dir.path().join("sitemap-health.xml"))?;
    assert!(health.contains("<loc>https://dapsiwow.com/tools/smoking-cost-calculator</loc>"));

    let main = std::fs::read_to_string(temp_dir.path().join("sitemap-main.xml"))?;
    assert_eq!(parse_urlset(&main, "unused")?.len(), 10);
    assert!(main.contains("<loc>https://dapsiwow.com/</loc>"));

    let index = std::fs::read_to_string(temp_dir.path().join("sitemap.xml"))?;
    let main_pos = index.find("sitemap-main.xml").unwrap();
    let finance_pos = index.find("sitemap-finance.xml").unwrap();
    let pdf_pos = index.find("sitemap-pdf.xml").unwrap();
    assert!(main_pos < finance_pos && finance_pos < pdf_pos);
    assert_eq!(index.matches("<sitemap>").count(), 4);

    Ok(())
}

#[tokio::test]
async fn test_generate_fails_without_tools() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let generator = SitemapGenerator::new(storage_in(&temp_dir), "https://dapsiwow.com");

    assert!(generator.generate("const toolsData = [];").await.is_err());
    assert!(!temp_dir.path().join("sitemap.xml").exists());
    Ok(())
}

#[tokio::test]
async fn test_split_categorizes_existing_sitemap() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("sitemap.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://dapsiwow.com/</loc><changefreq>daily</changefreq><priority>1.0</priority></url>
  <url><loc>https://dapsiwow.com/tools/home-loan-calculator</loc></url>
  <url><loc>https://dapsiwow.com/tools/Smoking-Cost-Calculator</loc></url>
  <url><loc>https://dapsiwow.com/tools/unlock-pdf</loc></url>
  <url><loc>https://dapsiwow.com/tools/mystery-widget</loc></url>
</urlset>"#,
    )?;

    let splitter =
        SitemapSplitter::new(storage_in(&temp_dir), "https://dapsiwow.com")?.with_date("2026-10-19");
    assert_eq!(splitter.categorize("https://dapsiwow.com/tools/word-counter"), "text");
    assert_eq!(splitter.categorize("https://dapsiwow.com/about"), "main");

    let report = splitter.split("sitemap.xml").await?;

    assert!(!report.used_example_urls);
    assert_eq!(report.urls_per_category.get("main"), Some(&2));
    assert_eq!(report.urls_per_category.get("finance"), Some(&1));
    assert_eq!(report.urls_per_category.get("health"), Some(&1));
    assert_eq!(report.urls_per_category.get("pdf"), Some(&1));
    assert!(!report.urls_per_category.contains_key("text"));
    assert!(!temp_dir.path().join("sitemap-text.xml").exists());

    let main = std::fs::read_to_string(temp_dir.path().join("sitemap-main.xml"))?;
    let urls = parse_urlset(&main, "unused")?;
    assert_eq!(urls[0].changefreq, "daily");
    assert_eq!(urls[1].loc, "https://dapsiwow.com/tools/mystery-widget");
    assert_eq!(urls[1].lastmod, "2026-10-19");

    let index = std::fs::read_to_string(temp_dir.path().join("sitemap.xml"))?;
    assert!(index.contains("<sitemapindex"));
    assert_eq!(index.matches("<sitemap>").count(), 4);

    Ok(())
}

#[tokio::test]
async fn test_split_without_input_uses_example_urls() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let splitter = SitemapSplitter::new(storage_in(&temp_dir), "https://dapsiwow.com")?;

    let report = splitter.split("missing.xml").await?;

    assert!(report.used_example_urls);
    assert_eq!(report.urls_per_category.values().sum::<usize>(), 24);
    assert_eq!(report.urls_per_category.get("pdf"), Some(&3));
    assert!(temp_dir.path().join("sitemap-text.xml").exists());
    assert!(temp_dir.path().join("sitemap.xml").exists());

    let pdf = std::fs::read_to_string(temp_dir.path().join("sitemap-pdf.xml"))?;
    assert!(pdf.contains("<loc>https://dapsiwow.com/tools/compress-pdf</loc>"));
    Ok(())
}

#[tokio::test]
async fn test_split_malformed_input_falls_back_to_example_urls() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("sitemap.xml"),
        "<urlset><url><loc>https://dapsiwow.com/tools/truncated",
    )?;
    let splitter = SitemapSplitter::new(storage_in(&temp_dir), "https://dapsiwow.com")?;

    let report = splitter.split("sitemap.xml").await?;

    assert!(report.used_example_urls);
    assert_eq!(report.urls_per_category.values().sum::<usize>(), 24);
    let index = std::fs::read_to_string(temp_dir.path().join("sitemap.xml"))?;
    assert!(index.contains("<sitemapindex"));
    Ok(())
}
