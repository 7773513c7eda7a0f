//! Sidebar facets command.

use storefront_catalog::prelude::*;

use super::FacetsArgs;
use crate::context::Context;
use crate::output::format_price;
use crate::source::ProductSource;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> anyhow::Result<()> {
    let view = args.view.unwrap_or(ctx.config.listing.default_view);
    let selection = args.filter.selection(ctx)?;
    let source = ProductSource::resolve(&args.source, ctx)?;

    let spinner = ctx.output.spinner(&format!("Loading products from {}", source.describe()));
    let loaded = source.load().await;
    spinner.finish_and_clear();
    let products = loaded?;

    let facets = Facets::collect(&products, view, &selection);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header(&format!("Filters for {}", view.title()));

    if let Some(bounds) = facets.price {
        ctx.output.kv(
            "Price",
            &format!("{} - {}", format_price(bounds.min), format_price(bounds.max)),
        );
    }

    if facets.facets.is_empty() {
        ctx.output.info("No filterable attributes on this page.");
        return Ok(());
    }

    for facet in &facets.facets {
        ctx.output.info("");
        ctx.output.info(&format!("{} ({})", facet.name, facet.key.as_key()));
        for value in &facet.values {
            let marker = if value.selected { " [selected]" } else { "" };
            ctx.output
                .list_item(&format!("{} ({}){}", value.value, value.count, marker));
        }
    }

    Ok(())
}
