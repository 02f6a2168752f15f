use clap::Parser;
use dapsi_tools::core::sitemap::catalog::{group_by_category, parse_tools};
use dapsi_tools::core::ConfigProvider;
use dapsi_tools::utils::error::ErrorSeverity;
use dapsi_tools::utils::{logger, validation::Validate};
use dapsi_tools::{LocalStorage, SiteConfig, SitemapGenerator, SitemapSplitter};

#[derive(Parser)]
#[command(name = "sitemap-gen")]
#[command(about = "Sitemap publishing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "site-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Split the existing sitemap instead of generating from the catalog
    #[arg(long)]
    split: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting sitemap-gen");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match SiteConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config, &args).await?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let outcome = if args.split {
        match SitemapSplitter::new(storage, config.site_base_url()) {
            Ok(splitter) => splitter
                .split(&config.site.sitemap_input)
                .await
                .map(|report| report.files),
            Err(e) => Err(e),
        }
    } else {
        match tokio::fs::read_to_string(&config.site.tools_file).await {
            Ok(source) => SitemapGenerator::new(storage, config.site_base_url())
                .generate(&source)
                .await
                .map(|report| report.files),
            Err(e) => Err(e.into()),
        }
    };

    match outcome {
        Ok(files) => {
            println!("✅ Sitemaps written to {}", config.output_path());
            for file in files {
                println!("  - {}", file);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Sitemap run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &SiteConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Site: {}", config.site_base_url());
    println!("  Output: {}", config.output_path());
    if args.split {
        println!("  Mode: split {}", config.site.sitemap_input);
    } else {
        println!("  Mode: generate from {}", config.site.tools_file);
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

async fn perform_dry_run(config: &SiteConfig, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.split {
        println!("🔍 Would split {} into category sitemaps", config.site.sitemap_input);
        return Ok(());
    }

    let source = tokio::fs::read_to_string(&config.site.tools_file).await?;
    let tools = parse_tools(&source, config.site_base_url())?;
    let grouped = group_by_category(tools);

    println!("🔍 Dry Run Analysis:");
    for (category, tools) in &grouped {
        println!("  sitemap-{}.xml: {} URLs", category, tools.len());
    }
    println!("  sitemap-main.xml");
    println!("  sitemap.xml (index, {} sitemaps)", grouped.len() + 1);
    Ok(())
}
