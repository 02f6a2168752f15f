use crate::core::ConfigProvider;
use crate::domain::model::Currency;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SITE_URL: &str = "https://dapsiwow.com";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_site_url")]
    pub base_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_tools_file")]
    pub tools_file: String,
    #[serde(default = "default_sitemap_input")]
    pub sitemap_input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplaySection {
    #[serde(default)]
    pub currency: Currency,
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_output_dir() -> String {
    "client/public".to_string()
}

fn default_tools_file() -> String {
    "client/src/data/tools.ts".to_string()
}

fn default_sitemap_input() -> String {
    "sitemap.xml".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: default_site_url(),
            output_dir: default_output_dir(),
            tools_file: default_tools_file(),
            sitemap_input: default_sitemap_input(),
        }
    }
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ToolError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ToolError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        for (field, value) in [
            ("site.base_url", &self.site.base_url),
            ("api.base_url", &self.api.base_url),
        ] {
            if value.trim().is_empty() {
                return Err(ToolError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }

        validate_url("site.base_url", &self.site.base_url)?;
        validate_url("api.base_url", &self.api.base_url)?;
        validate_path("site.output_dir", &self.site.output_dir)?;
        validate_path("site.tools_file", &self.site.tools_file)?;

        if self.api.timeout_seconds == Some(0) {
            return Err(ToolError::InvalidConfigValueError {
                field: "api.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn site_base_url(&self) -> &str {
        &self.site.base_url
    }

    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn output_path(&self) -> &str {
        &self.site.output_dir
    }

    fn currency(&self) -> Currency {
        self.display.currency
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[site]
base_url = "https://example.com"
output_dir = "./public"
tools_file = "./tools.ts"

[api]
base_url = "https://api.example.com"
timeout_seconds = 30

[display]
currency = "INR"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.site_base_url(), "https://example.com");
        assert_eq!(config.output_path(), "./public");
        assert_eq!(config.site.sitemap_input, "sitemap.xml");
        assert_eq!(config.request_timeout_seconds(), Some(30));
        assert_eq!(config.currency(), Currency::Inr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();

        assert_eq!(config.site_base_url(), DEFAULT_SITE_URL);
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.currency(), Currency::Usd);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DAPSI_TEST_API_URL", "https://pdf.example.com");

        let config = SiteConfig::from_toml_str(
            r#"
[api]
base_url = "${DAPSI_TEST_API_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://pdf.example.com");

        std::env::remove_var("DAPSI_TEST_API_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = SiteConfig::from_toml_str(
            r#"
[site]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = SiteConfig::from_toml_str(
            r#"
[api]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = SiteConfig::from_toml_str(
            r#"
[api]
base_url = ""
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ToolError::MissingConfigError { field }) if field == "api.base_url"
        ));
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let result = SiteConfig::from_toml_str(
            r#"
[display]
currency = "XYZ"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[site]\nbase_url = \"https://file.example.com\"\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.base_url, "https://file.example.com");
    }
}
