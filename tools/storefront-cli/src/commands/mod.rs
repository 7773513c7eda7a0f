//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod list;
pub mod show;
pub mod validate;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use storefront_catalog::prelude::{CatalogView, FilterKey, FilterSelection, SortKey};

use crate::context::Context;

/// Where to read products from; overrides the config file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Read products from a JSON file.
    #[arg(long, conflicts_with = "url")]
    pub source: Option<String>,

    /// Fetch products from a REST endpoint.
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum rows requested from the endpoint.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Sidebar filter flags.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Filter category and accepted values, e.g. `--filter brands=HP,Dell`.
    /// Repeatable.
    #[arg(short, long = "filter", value_name = "KEY=VALUES")]
    pub filters: Vec<String>,

    /// JSON file holding a filter object.
    #[arg(long, value_name = "FILE")]
    pub filters_file: Option<String>,

    /// Lowest accepted price.
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Highest accepted price.
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Only products that are in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,
}

impl FilterArgs {
    /// Combine the filters file and the flags into one selection. Flags
    /// add to the file's values.
    pub fn selection(&self, ctx: &Context) -> Result<FilterSelection> {
        let mut selection = match &self.filters_file {
            Some(path) => {
                let path = ctx.resolve_path(path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read filters file: {}", path.display()))?;
                FilterSelection::from_json_str(&content)
                    .with_context(|| format!("Failed to parse filters file: {}", path.display()))?
            }
            None => FilterSelection::new(),
        };

        for flag in &self.filters {
            let (key, values) = parse_filter_flag(flag)?;
            selection.add_values(key, values);
        }

        if self.price_min.is_some() || self.price_max.is_some() {
            let mut range = selection.price_range.take().unwrap_or_default();
            if self.price_min.is_some() {
                range.min = self.price_min;
            }
            if self.price_max.is_some() {
                range.max = self.price_max;
            }
            selection.price_range = Some(range);
        }

        selection.in_stock |= self.in_stock;
        selection.featured |= self.featured;

        Ok(selection)
    }
}

/// Parse `key=v1,v2` into a filter category and its values.
pub fn parse_filter_flag(flag: &str) -> Result<(FilterKey, Vec<String>)> {
    let Some((key, values)) = flag.split_once('=') else {
        bail!("Invalid filter '{}': expected KEY=VALUE[,VALUE...]", flag);
    };

    let Some(key) = FilterKey::from_key(key.trim()) else {
        let known: Vec<&str> = FilterKey::ALL.iter().map(FilterKey::as_key).collect();
        bail!("Unknown filter key '{}'. Known keys: {}", key.trim(), known.join(", "));
    };

    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    Ok((key, values))
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Page to list (products, chromebook, workstation, sales, discounted, clearance).
    #[arg(long)]
    pub view: Option<CatalogView>,

    /// Sort order (name, price-low, price-high, brand, newest, discount).
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Free-text search; every word must match.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page number (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page.
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Print every matching product instead of one page.
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Page to collect filter values for.
    #[arg(long)]
    pub view: Option<CatalogView>,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Exit with an error when any issue is found.
    #[arg(long)]
    pub strict: bool,

    /// Show at most N issues.
    #[arg(short, long, default_value = "50")]
    pub max_issues: usize,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::prelude::PriceRange;

    #[test]
    fn test_parse_filter_flag() {
        let (key, values) = parse_filter_flag("brands=HP, Dell ,,").unwrap();
        assert_eq!(key, FilterKey::Brands);
        assert_eq!(values, vec!["HP", "Dell"]);

        // legacy alias
        let (key, _) = parse_filter_flag("hdd=256GB").unwrap();
        assert_eq!(key, FilterKey::Storage);
    }

    #[test]
    fn test_parse_filter_flag_errors() {
        assert!(parse_filter_flag("brands").is_err());

        let err = parse_filter_flag("colour=red").unwrap_err();
        assert!(err.to_string().contains("Unknown filter key 'colour'"));
    }

    #[test]
    fn test_blank_filter_values_are_inactive() {
        let (key, values) = parse_filter_flag("ram=").unwrap();
        let selection = FilterSelection::new().with_values(key, values);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_price_flags_build_range() {
        let args = FilterArgs {
            price_max: Some(30000.0),
            in_stock: true,
            ..FilterArgs::default()
        };
        let ctx = test_context();
        let selection = args.selection(&ctx).unwrap();
        assert_eq!(selection.price_range, Some(PriceRange::new(None, Some(30000.0))));
        assert!(selection.in_stock);
        assert!(!selection.featured);
    }

    pub(crate) fn test_context() -> Context {
        Context {
            config: crate::config::StorefrontConfig::default(),
            config_path: None,
            output: crate::output::Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }
}
