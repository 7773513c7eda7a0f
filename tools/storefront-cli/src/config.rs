//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_catalog::prelude::{CatalogView, SortKey, NEW_PRODUCT_WINDOW_DAYS};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Where products are read from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text, picking the format from the file name.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Problems that make the config unusable, then advisory warnings.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match (&self.source.path, &self.source.url) {
            (Some(_), Some(_)) => {
                errors.push("source.path and source.url are mutually exclusive".to_string())
            }
            (None, None) => warnings.push(
                "no source configured; pass --source or --url to each command".to_string(),
            ),
            _ => {}
        }

        if let Some(url) = &self.source.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("source.url '{}' must be an http(s) URL", url));
            }
            if self.source.api_key_env.is_none() {
                warnings.push("source.api_key_env is not set; requests are unauthenticated".to_string());
            }
        }

        if self.source.limit == 0 {
            errors.push("source.limit must be at least 1".to_string());
        }

        if !(1..=100).contains(&self.listing.per_page) {
            errors.push("listing.per_page must be 1-100".to_string());
        }

        if self.listing.new_within_days <= 0 {
            warnings.push("listing.new_within_days <= 0 marks nothing as new".to_string());
        }

        (errors, warnings)
    }
}

/// Product source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local JSON file holding the product array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Products endpoint of the hosted database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Maximum rows requested.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            api_key_env: None,
            limit: default_limit(),
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page used when `--view` is not given.
    #[serde(default)]
    pub default_view: CatalogView,

    /// Sort used when `--sort` is not given; the page's own default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortKey>,

    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Age in days under which a product counts as new.
    #[serde(default = "default_new_within_days")]
    pub new_within_days: i64,
}

fn default_per_page() -> usize {
    24
}

fn default_new_within_days() -> i64 {
    NEW_PRODUCT_WINDOW_DAYS
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_view: CatalogView::default(),
            default_sort: None,
            per_page: default_per_page(),
            new_within_days: default_new_within_days(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront catalog configuration

[source]
# Read products from a JSON export...
path = "products.json"
# ...or from the hosted products endpoint.
# url = "https://your-project.supabase.co/rest/v1/products"
# api_key_env = "STOREFRONT_API_KEY"
limit = {limit}

[listing]
default_view = "products"
# default_sort = "price-low"
per_page = {per_page}
new_within_days = {days}

[logging]
filter = "warn"
"#,
        limit = default_limit(),
        per_page = default_per_page(),
        days = NEW_PRODUCT_WINDOW_DAYS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = StorefrontConfig::parse("storefront.toml", &generate_default_config()).unwrap();
        assert_eq!(config.source.path.as_deref(), Some("products.json"));
        assert_eq!(config.source.limit, 5000);
        assert_eq!(config.listing.default_view, CatalogView::Products);
        assert_eq!(config.listing.default_sort, None);
        assert_eq!(config.listing.per_page, 24);
        assert_eq!(config.logging.filter, "warn");

        let (errors, warnings) = config.check();
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = StorefrontConfig::parse(
            "storefront.toml",
            r#"
            [listing]
            default_view = "clearance"
            default_sort = "price-high"
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.default_view, CatalogView::Clearance);
        assert_eq!(config.listing.default_sort, Some(SortKey::PriceHigh));
        assert_eq!(config.listing.new_within_days, NEW_PRODUCT_WINDOW_DAYS);
        assert_eq!(config.source.limit, 5000);
    }

    #[test]
    fn test_json_config() {
        let config = StorefrontConfig::parse(
            "storefront.json",
            r#"{"source": {"url": "https://db.example.com/rest/v1/products", "api_key_env": "KEY"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.source.url.as_deref(),
            Some("https://db.example.com/rest/v1/products")
        );
        assert!(config.check().0.is_empty());
    }

    #[test]
    fn test_unknown_view_rejected() {
        let result = StorefrontConfig::parse(
            "storefront.toml",
            "[listing]\ndefault_view = \"outlet\"\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_check_reports_errors() {
        let mut config = StorefrontConfig::default();
        config.source.path = Some("a.json".into());
        config.source.url = Some("ftp://example.com".into());
        config.source.limit = 0;
        config.listing.per_page = 0;

        let (errors, _) = config.check();
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }
}
