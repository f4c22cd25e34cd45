use crate::adapters::http::DEFAULT_FUNCTION_PATH;
use crate::core::catalog::PageCatalog;
use crate::core::notify::DEFAULT_TTL_MS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_function_path, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub submission: SubmissionSection,
    pub notifications: NotificationSection,
    pub catalog: CatalogSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub name: String,
    pub fallback_phone: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Employment Defense Counsel".to_string(),
            fallback_phone: "(800) 555-0199".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionSection {
    pub base_url: String,
    pub function_path: String,
}

impl Default for SubmissionSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_string(),
            function_path: DEFAULT_FUNCTION_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSection {
    pub ttl_ms: u64,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// 選用的 TOML 頁面目錄，設定後取代內建表
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub output_path: String,
    pub prefix: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            prefix: "consultations".to_string(),
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SUBMISSION_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 載入頁面目錄：有設定路徑就讀檔，否則使用內建表
    pub fn load_catalog(&self) -> Result<PageCatalog> {
        match &self.catalog.path {
            Some(path) => {
                tracing::info!("📁 Loading page catalog from: {}", path);
                PageCatalog::from_file(path)
            }
            None => Ok(PageCatalog::builtin()),
        }
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("site.name", &self.site.name)?;
        validate_non_empty_string("site.fallback_phone", &self.site.fallback_phone)?;
        validate_url("submission.base_url", &self.submission.base_url)?;
        validate_function_path("submission.function_path", &self.submission.function_path)?;
        validate_positive_number("notifications.ttl_ms", self.notifications.ttl_ms, 1)?;
        if let Some(path) = &self.catalog.path {
            validate_path("catalog.path", path)?;
        }
        validate_path("storage.output_path", &self.storage.output_path)?;
        validate_non_empty_string("storage.prefix", &self.storage.prefix)?;
        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn submission_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.submission.base_url.trim_end_matches('/'),
            self.submission.function_path
        )
    }

    fn fallback_phone(&self) -> &str {
        &self.site.fallback_phone
    }

    fn notification_ttl_ms(&self) -> u64 {
        self.notifications.ttl_ms
    }

    fn output_prefix(&self) -> &str {
        &self.storage.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.submission_endpoint(),
            "http://localhost:8888/.netlify/functions/submit-consultation"
        );
        assert_eq!(config.notification_ttl_ms(), 6000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
[site]
fallback_phone = "(213) 555-0142"

[submission]
base_url = "https://example-firm.netlify.app/"
"#,
        )
        .unwrap();

        assert_eq!(config.fallback_phone(), "(213) 555-0142");
        assert_eq!(config.site.name, "Employment Defense Counsel");
        assert_eq!(
            config.submission_endpoint(),
            "https://example-firm.netlify.app/.netlify/functions/submit-consultation"
        );
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("FIRM_SITE_TEST_PHONE", "(310) 555-0177");
        let config = SiteConfig::from_toml_str(
            r#"
[site]
fallback_phone = "${FIRM_SITE_TEST_PHONE}"
name = "${FIRM_SITE_TEST_UNSET_NAME}"
"#,
        )
        .unwrap();

        assert_eq!(config.site.fallback_phone, "(310) 555-0177");
        assert_eq!(config.site.name, "${FIRM_SITE_TEST_UNSET_NAME}");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = SiteConfig::default();
        config.notifications.ttl_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(SiteError::InvalidConfigValueError { .. })
        ));

        let mut config = SiteConfig::default();
        config.submission.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_catalog_defaults_to_builtin() {
        let config = SiteConfig::default();
        assert_eq!(config.load_catalog().unwrap(), PageCatalog::builtin());
    }
}
