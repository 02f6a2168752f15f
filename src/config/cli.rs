use crate::config::toml_config::SiteConfig;
use crate::domain::model::{CompoundingFrequency, Currency, PageSelection};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dapsi-tools")]
#[command(about = "Calculators, PDF utilities and sitemap tooling for the tool catalog")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print results as JSON and log in JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Currency code used to render amounts (USD, EUR, INR, ...)
    #[arg(long, global = true)]
    pub currency: Option<Currency>,

    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Loan EMI (equated monthly instalment)
    Emi(EmiArgs),
    /// Retirement savings projection
    Retirement(RetirementArgs),
    /// What smoking costs over time
    Smoking(SmokingArgs),
    /// Compound interest growth
    Compound(CompoundArgs),
    /// PDF utilities backed by the PDF service
    #[command(subcommand)]
    Pdf(PdfCommand),
    /// Sitemap publishing
    #[command(subcommand)]
    Sitemap(SitemapCommand),
}

#[derive(Debug, Clone, Args)]
pub struct EmiArgs {
    #[arg(long)]
    pub principal: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: f64,
    #[arg(long)]
    pub tenure: u32,
    /// Interpret tenure as months instead of years
    #[arg(long)]
    pub months: bool,
    /// Write the amortization schedule to this CSV file
    #[arg(long)]
    pub schedule: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct RetirementArgs {
    #[arg(long)]
    pub current_age: u32,
    #[arg(long)]
    pub retirement_age: u32,
    #[arg(long, default_value = "0")]
    pub current_savings: f64,
    #[arg(long, default_value = "0")]
    pub monthly_contribution: f64,
    /// Expected annual return in percent
    #[arg(long, default_value = "7")]
    pub rate: f64,
    #[arg(long, default_value = "4")]
    pub withdrawal_rate: f64,
    #[arg(long, default_value = "0")]
    pub inflation: f64,
}

#[derive(Debug, Clone, Args)]
pub struct SmokingArgs {
    #[arg(long)]
    pub per_day: f64,
    #[arg(long)]
    pub pack_price: f64,
    #[arg(long, default_value = "20")]
    pub pack_size: u32,
    #[arg(long, default_value = "10")]
    pub years: u32,
    /// Annual return if the money were invested instead
    #[arg(long, default_value = "0")]
    pub invest_rate: f64,
}

#[derive(Debug, Clone, Args)]
pub struct CompoundArgs {
    #[arg(long)]
    pub principal: f64,
    #[arg(long)]
    pub rate: f64,
    #[arg(long)]
    pub years: f64,
    #[arg(long, default_value = "monthly")]
    pub frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PdfCommand {
    /// Remove the password from a protected PDF
    Unlock {
        file: PathBuf,
        #[arg(long)]
        password: String,
    },
    /// Change the page background colour
    Background {
        file: PathBuf,
        #[arg(long, default_value = "#FFFFFF")]
        color: String,
        #[arg(long, default_value = "1.0")]
        opacity: f64,
        /// `all`, or pages such as `1,3-5`
        #[arg(long, default_value = "all")]
        pages: PageSelection,
    },
    /// Stamp a text annotation onto a page
    Annotate {
        file: PathBuf,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "50")]
        x: f64,
        #[arg(long, default_value = "50")]
        y: f64,
        #[arg(long, default_value = "12")]
        font_size: f64,
        #[arg(long, default_value = "#000000")]
        color: String,
    },
    /// Annotations from a JSON file, optional rotation and encryption
    AdvancedEdit {
        file: PathBuf,
        #[arg(long)]
        annotations: Option<PathBuf>,
        #[arg(long)]
        rotate: Option<i32>,
        #[arg(long)]
        encrypt_password: Option<String>,
    },
    /// Page count and dimensions
    PageInfo { file: PathBuf },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SitemapCommand {
    /// Build category sitemaps from the tool catalog
    Generate {
        #[arg(long)]
        tools_file: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        /// lastmod date (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<String>,
    },
    /// Split an existing sitemap into category sitemaps
    Split {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
}

impl CliConfig {
    /// File configuration (or defaults) with command line overrides applied.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        if let Some(currency) = self.currency {
            config.display.currency = currency;
        }
        if let Some(api_base_url) = &self.api_base_url {
            config.api.base_url = api_base_url.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.site.output_dir = output_path.clone();
        }
        match &self.command {
            Command::Sitemap(SitemapCommand::Generate {
                tools_file,
                base_url,
                ..
            }) => {
                if let Some(tools_file) = tools_file {
                    config.site.tools_file = tools_file.clone();
                }
                if let Some(base_url) = base_url {
                    config.site.base_url = base_url.clone();
                }
            }
            Command::Sitemap(SitemapCommand::Split {
                input, base_url, ..
            }) => {
                if let Some(input) = input {
                    config.site.sitemap_input = input.clone();
                }
                if let Some(base_url) = base_url {
                    config.site.base_url = base_url.clone();
                }
            }
            _ => {}
        }

        Ok(config)
    }
}
