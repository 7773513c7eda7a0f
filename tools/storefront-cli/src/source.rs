//! Product sources: a local JSON export or the hosted products endpoint.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;
use storefront_catalog::prelude::{load_products, Product};
use tracing::{debug, info};

use crate::commands::SourceArgs;
use crate::context::Context;

/// Where the product payload comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductSource {
    /// JSON file holding the product array.
    File(PathBuf),
    /// REST endpoint returning the product array.
    Http {
        url: String,
        api_key: Option<String>,
        limit: usize,
    },
}

impl ProductSource {
    /// Pick the source from command flags, falling back to the config file.
    pub fn resolve(args: &SourceArgs, ctx: &Context) -> Result<Self> {
        let source = &ctx.config.source;
        let limit = args.limit.unwrap_or(source.limit);

        if let Some(path) = &args.source {
            return Ok(ProductSource::File(ctx.resolve_path(path)));
        }
        if let Some(url) = &args.url {
            return Ok(ProductSource::Http {
                url: url.clone(),
                api_key: api_key(source.api_key_env.as_deref()),
                limit,
            });
        }

        match (&source.path, &source.url) {
            (Some(_), Some(_)) => bail!("source.path and source.url are mutually exclusive"),
            (Some(path), None) => Ok(ProductSource::File(ctx.resolve_path(path))),
            (None, Some(url)) => Ok(ProductSource::Http {
                url: url.clone(),
                api_key: api_key(source.api_key_env.as_deref()),
                limit,
            }),
            (None, None) => bail!(
                "No product source configured. Pass --source/--url or run `storefront config init`."
            ),
        }
    }

    /// Short description for messages.
    pub fn describe(&self) -> String {
        match self {
            ProductSource::File(path) => path.display().to_string(),
            ProductSource::Http { url, .. } => url.clone(),
        }
    }

    /// Fetch the raw payload.
    pub async fn fetch(&self) -> Result<Value> {
        match self {
            ProductSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read products file: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse products file: {}", path.display()))
            }
            ProductSource::Http {
                url,
                api_key,
                limit,
            } => fetch_http(url, api_key.as_deref(), *limit).await,
        }
    }

    /// Fetch and normalize into canonical products.
    pub async fn load(&self) -> Result<Vec<Product>> {
        let payload = self.fetch().await?;
        let products = load_products(&payload);
        info!(source = %self.describe(), count = products.len(), "loaded products");
        Ok(products)
    }
}

fn api_key(env: Option<&str>) -> Option<String> {
    let name = env?;
    let key = std::env::var(name).ok().filter(|k| !k.trim().is_empty());
    if key.is_none() {
        debug!(env = name, "api key variable is not set");
    }
    key
}

/// Query parameters sent to the products endpoint.
fn query_params(limit: usize) -> [(&'static str, String); 3] {
    [
        ("select", "*".to_string()),
        ("is_active", "eq.true".to_string()),
        ("limit", limit.to_string()),
    ]
}

async fn fetch_http(url: &str, api_key: Option<&str>, limit: usize) -> Result<Value> {
    let client = reqwest::Client::new();
    let mut request = client.get(url).query(&query_params(limit));
    if let Some(key) = api_key {
        request = request
            .header("apikey", key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key));
    }

    debug!(url, limit, "requesting products");
    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to reach products endpoint: {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Products endpoint returned {}: {}", status, body.trim());
    }

    response
        .json::<Value>()
        .await
        .context("Products endpoint returned invalid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let params = query_params(5000);
        assert_eq!(params[0], ("select", "*".to_string()));
        assert_eq!(params[1], ("is_active", "eq.true".to_string()));
        assert_eq!(params[2], ("limit", "5000".to_string()));
    }

    #[test]
    fn test_describe() {
        let file = ProductSource::File(PathBuf::from("/data/products.json"));
        assert_eq!(file.describe(), "/data/products.json");

        let http = ProductSource::Http {
            url: "https://db.example.com/rest/v1/products".into(),
            api_key: None,
            limit: 10,
        };
        assert_eq!(http.describe(), "https://db.example.com/rest/v1/products");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("storefront-cli-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "EliteBook", "price": "30000"}, {"name": "no id"}]"#,
        )
        .unwrap();

        let products = ProductSource::File(path.clone()).load().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, 30000.0);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = ProductSource::File(PathBuf::from("/nonexistent/products.json"));
        let err = source.load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read products file"));
    }
}
