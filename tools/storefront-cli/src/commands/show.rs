//! Single product command.

use anyhow::{bail, Result};
use chrono::Utc;
use storefront_catalog::prelude::*;

use super::list::ProductCard;
use super::ShowArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};
use crate::source::ProductSource;

/// Run the show command.
///
/// SEO-only products are found here even though no listing shows them.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let source = ProductSource::resolve(&args.source, ctx)?;
    let products = source.load().await?;

    let Some(product) = products.iter().find(|p| p.id.as_str() == args.id.trim()) else {
        bail!("Product '{}' not found in {}", args.id, source.describe());
    };

    let card = ProductCard::from_product(product, Utc::now(), ctx.config.listing.new_within_days);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "card": card,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Product: {}", card.name));
    ctx.output.kv("ID", &card.id);
    if let Some(brand) = &card.brand {
        ctx.output.kv("Brand", brand);
    }
    if let Some(category) = &card.category {
        ctx.output.kv("Category", category);
    }
    ctx.output.kv("Badge", card.badge.label());
    ctx.output.kv("Price", &format_price(card.price));
    if let Some(original) = card.original_price {
        ctx.output.kv("Original price", &format_price(original));
    }
    if card.discount_percent != 0.0 {
        ctx.output.kv("Discount", &format!("{}%", card.discount_percent));
    }
    if let Some(savings) = card.savings {
        ctx.output.kv("You save", &format_price(savings));
    }
    ctx.output.kv("Stock", &stock_badge(card.stock));
    if card.is_new {
        ctx.output.kv("New", "yes");
    }
    if card.is_featured {
        ctx.output.kv("Featured", "yes");
    }
    if card.is_clearance {
        ctx.output.kv("Clearance", "yes");
    }
    if !product.is_listed() {
        ctx.output.warn("SEO-only: hidden from every listing");
    }

    let specs: Vec<(&str, &str)> = FilterKey::ALL
        .into_iter()
        .filter_map(|key| key.value_of(product).map(|v| (key.label(), v)))
        .filter(|(_, v)| !v.trim().is_empty())
        .collect();
    if !specs.is_empty() {
        ctx.output.info("");
        ctx.output.info("Specifications:");
        for (label, value) in specs {
            ctx.output.list_item(&format!("{}: {}", label, value));
        }
    }

    if let Some(description) = product.description.as_deref() {
        ctx.output.info("");
        ctx.output.info(description);
    }

    Ok(())
}
