use clap::Parser;
use dapsi_tools::adapters::pdf_client::{load_upload, save_result};
use dapsi_tools::app::report;
use dapsi_tools::config::cli::{Command, PdfCommand, SitemapCommand};
use dapsi_tools::core::finance::{
    amortization_schedule, calculate_compound, calculate_emi, calculate_retirement,
    calculate_smoking_cost, write_schedule_csv,
};
use dapsi_tools::core::ConfigProvider;
use dapsi_tools::domain::model::{
    AdvancedEditRequest, Annotation, BackgroundOptions, CompoundInput, LoanInput,
    RetirementInput, SmokingInput, TenureUnit,
};
use dapsi_tools::domain::ports::PdfService;
use dapsi_tools::utils::error::{ErrorSeverity, Result, ToolError};
use dapsi_tools::utils::{logger, validation::Validate};
use dapsi_tools::{CliConfig, HttpPdfService, LocalStorage, SiteConfig, SitemapGenerator, SitemapSplitter};
use serde::Serialize;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.site_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli, &config).await {
        Ok(output) => println!("{}", output),
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: ToolError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run(cli: &CliConfig, config: &SiteConfig) -> Result<String> {
    let currency = config.currency();
    tracing::debug!(%currency, locale = currency.locale(), "Formatting amounts");

    match &cli.command {
        Command::Emi(args) => {
            let input = LoanInput {
                principal: args.principal,
                annual_rate_percent: args.rate,
                tenure: args.tenure,
                tenure_unit: if args.months {
                    TenureUnit::Months
                } else {
                    TenureUnit::Years
                },
            };
            let result = calculate_emi(&input)?;

            if let Some(path) = &args.schedule {
                let rows = amortization_schedule(&input)?;
                let file = std::fs::File::create(path)?;
                write_schedule_csv(&rows, file)?;
                tracing::info!("📁 Amortization schedule saved to {}", path.display());
            }

            if cli.json {
                to_json(&result)
            } else {
                Ok(report::render_emi(&result, currency))
            }
        }
        Command::Retirement(args) => {
            let result = calculate_retirement(&RetirementInput {
                current_age: args.current_age,
                retirement_age: args.retirement_age,
                current_savings: args.current_savings,
                monthly_contribution: args.monthly_contribution,
                annual_return_percent: args.rate,
                withdrawal_rate_percent: args.withdrawal_rate,
                inflation_percent: args.inflation,
            })?;
            if cli.json {
                to_json(&result)
            } else {
                Ok(report::render_retirement(&result, currency))
            }
        }
        Command::Smoking(args) => {
            let result = calculate_smoking_cost(&SmokingInput {
                cigarettes_per_day: args.per_day,
                pack_price: args.pack_price,
                cigarettes_per_pack: args.pack_size,
                years: args.years,
                invest_return_percent: args.invest_rate,
            })?;
            if cli.json {
                to_json(&result)
            } else {
                Ok(report::render_smoking(&result, currency))
            }
        }
        Command::Compound(args) => {
            let result = calculate_compound(&CompoundInput {
                principal: args.principal,
                annual_rate_percent: args.rate,
                years: args.years,
                frequency: args.frequency,
            })?;
            if cli.json {
                to_json(&result)
            } else {
                Ok(report::render_compound(&result, currency))
            }
        }
        Command::Pdf(command) => run_pdf(cli, config, command).await,
        Command::Sitemap(command) => run_sitemap(cli, config, command).await,
    }
}

async fn run_pdf(cli: &CliConfig, config: &SiteConfig, command: &PdfCommand) -> Result<String> {
    let service = HttpPdfService::from_config(config)?;
    let storage = LocalStorage::new(config.output_path().to_string());

    let (prefix, upload, bytes) = match command {
        PdfCommand::Unlock { file, password } => {
            let upload = load_upload(file).await?;
            let bytes = service.unlock(&upload, password).await?;
            ("unlocked", upload, bytes)
        }
        PdfCommand::Background {
            file,
            color,
            opacity,
            pages,
        } => {
            let upload = load_upload(file).await?;
            let options = BackgroundOptions {
                color: color.clone(),
                opacity: *opacity,
                pages: pages.clone(),
            };
            let bytes = service.change_background(&upload, &options).await?;
            ("background", upload, bytes)
        }
        PdfCommand::Annotate {
            file,
            text,
            page,
            x,
            y,
            font_size,
            color,
        } => {
            let upload = load_upload(file).await?;
            let annotation = Annotation {
                page: *page,
                x: *x,
                y: *y,
                text: text.clone(),
                font_size: *font_size,
                color: color.clone(),
            };
            let bytes = service.edit(&upload, &[annotation]).await?;
            ("edited", upload, bytes)
        }
        PdfCommand::AdvancedEdit {
            file,
            annotations,
            rotate,
            encrypt_password,
        } => {
            let upload = load_upload(file).await?;
            let annotations: Vec<Annotation> = match annotations {
                Some(path) => serde_json::from_slice(&tokio::fs::read(path).await?)?,
                None => Vec::new(),
            };
            let request = AdvancedEditRequest {
                annotations,
                rotate_degrees: *rotate,
                encrypt_password: encrypt_password.clone(),
            };
            let bytes = service.advanced_edit(&upload, &request).await?;
            ("edited", upload, bytes)
        }
        PdfCommand::PageInfo { file } => {
            let upload = load_upload(file).await?;
            let info = service.page_info(&upload).await?;
            return if cli.json {
                to_json(&info)
            } else {
                Ok(report::render_page_info(&info))
            };
        }
    };

    let name = save_result(&storage, prefix, &upload.file_name, &bytes).await?;
    let path = storage.full_path(&name);
    if cli.json {
        to_json(&serde_json::json!({ "file": path, "bytes": bytes.len() }))
    } else {
        Ok(format!("✅ Saved {}", path.display()))
    }
}

async fn run_sitemap(
    cli: &CliConfig,
    config: &SiteConfig,
    command: &SitemapCommand,
) -> Result<String> {
    let storage = LocalStorage::new(config.output_path().to_string());

    match command {
        SitemapCommand::Generate { date, .. } => {
            let source = tokio::fs::read_to_string(&config.site.tools_file)
                .await
                .map_err(|e| ToolError::ConfigError {
                    message: format!("cannot read tools file '{}': {}", config.site.tools_file, e),
                })?;

            let mut generator = SitemapGenerator::new(storage, config.site_base_url());
            if let Some(date) = date {
                generator = generator.with_date(date.clone());
            }
            let report = generator.generate(&source).await?;

            if cli.json {
                return to_json(&serde_json::json!({
                    "files": report.files,
                    "toolsPerCategory": report.tools_per_category,
                }));
            }
            let mut lines = vec![format!("✅ Generated sitemaps for {} tools", report.total_tools())];
            for (category, count) in &report.tools_per_category {
                lines.push(format!("  {}: {} tools", category, count));
            }
            lines.extend(report.files.iter().map(|f| format!("  - {}", f)));
            Ok(lines.join("\n"))
        }
        SitemapCommand::Split { date, .. } => {
            let mut splitter = SitemapSplitter::new(storage, config.site_base_url())?;
            if let Some(date) = date {
                splitter = splitter.with_date(date.clone());
            }
            let report = splitter.split(&config.site.sitemap_input).await?;

            if cli.json {
                return to_json(&serde_json::json!({
                    "files": report.files,
                    "urlsPerCategory": report.urls_per_category,
                    "usedExampleUrls": report.used_example_urls,
                }));
            }
            let mut lines = vec!["✅ Sitemap split completed".to_string()];
            for (category, count) in &report.urls_per_category {
                lines.push(format!("  {}: {} URLs", category, count));
            }
            lines.extend(report.files.iter().map(|f| format!("  - {}", f)));
            Ok(lines.join("\n"))
        }
    }
}
