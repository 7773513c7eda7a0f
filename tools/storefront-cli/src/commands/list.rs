//! Product listing command.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_catalog::catalog::pricing;
use storefront_catalog::prelude::*;

use super::ListArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};
use crate::source::ProductSource;

/// A product as rendered on a listing card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub discount_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    pub stock: StockStatus,
    pub badge: CategoryBadge,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_clearance: bool,
}

impl ProductCard {
    pub fn from_product(product: &Product, now: DateTime<Utc>, new_within_days: i64) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.display_name().to_string(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price,
            original_price: product.original_price,
            discount_percent: product.discount_percent(),
            savings: pricing::savings(product),
            stock: StockStatus::of(product),
            badge: product.badge(),
            is_new: product.is_new_within(now, new_within_days),
            is_featured: product.is_featured,
            is_clearance: product.is_clearance,
        }
    }
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    query: &'a ListingQuery,
    pagination: Pagination,
    products: Vec<ProductCard>,
}

/// Build the listing query from flags and config defaults.
pub fn build_query(args: &ListArgs, ctx: &Context) -> anyhow::Result<ListingQuery> {
    let view = args.view.unwrap_or(ctx.config.listing.default_view);
    let sort = args
        .sort
        .or(ctx.config.listing.default_sort)
        .unwrap_or_else(|| view.default_sort());

    let mut query = ListingQuery::for_view(view)
        .with_filters(args.filter.selection(ctx)?)
        .with_sort(sort);
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    Ok(query)
}

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let query = build_query(&args, ctx)?;
    let source = ProductSource::resolve(&args.source, ctx)?;

    let spinner = ctx.output.spinner(&format!("Loading products from {}", source.describe()));
    let loaded = source.load().await;
    spinner.finish_and_clear();
    let products = loaded?;

    ctx.output.debug(&format!("Loaded {} products", products.len()));

    let listed = storefront_catalog::search::run(&products, &query);
    let per_page = if args.all {
        listed.len().max(1)
    } else {
        args.per_page.unwrap_or(ctx.config.listing.per_page)
    };
    let page = ListingPage::paginate(&listed, if args.all { 1 } else { args.page }, per_page);

    let now = Utc::now();
    let days = ctx.config.listing.new_within_days;
    let cards: Vec<ProductCard> = page
        .items
        .iter()
        .map(|p| ProductCard::from_product(p, now, days))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&ListingOutput {
            query: &query,
            pagination: page.pagination,
            products: cards,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} ({})",
        query.view.title(),
        query.sort.display_name()
    ));

    if cards.is_empty() {
        ctx.output.info("No products match the current filters.");
        return Ok(());
    }

    print_cards(&cards, ctx);

    let pagination = page.pagination;
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} product(s), page {}/{}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));

    Ok(())
}

const WIDTHS: [usize; 8] = [8, 36, 10, 10, 6, 12, 12, 3];

fn print_cards(cards: &[ProductCard], ctx: &Context) {
    ctx.output.table_row(
        &["ID", "NAME", "BRAND", "PRICE", "OFF", "STOCK", "BADGE", "NEW"],
        &WIDTHS,
    );
    ctx.output.info(&"-".repeat(WIDTHS.iter().sum::<usize>() + 2 * (WIDTHS.len() - 1)));

    for card in cards {
        let price = format_price(card.price);
        let off = if card.discount_percent > 0.0 {
            format!("{}%", card.discount_percent)
        } else {
            "-".to_string()
        };
        let stock = stock_badge(card.stock);
        let new = if card.is_new { "yes" } else { "" };

        ctx.output.table_row(
            &[
                &card.id,
                &card.name,
                card.brand.as_deref().unwrap_or("-"),
                &price,
                &off,
                &stock,
                card.badge.label(),
                new,
            ],
            &WIDTHS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;
    use crate::commands::{FilterArgs, SourceArgs};
    use chrono::TimeZone;

    fn list_args() -> ListArgs {
        ListArgs {
            view: None,
            sort: None,
            search: None,
            filter: FilterArgs::default(),
            page: 1,
            per_page: None,
            all: false,
            source: SourceArgs::default(),
        }
    }

    #[test]
    fn test_query_defaults_follow_view() {
        let ctx = test_context();
        let mut args = list_args();
        args.view = Some(CatalogView::Clearance);

        let query = build_query(&args, &ctx).unwrap();
        assert_eq!(query.view, CatalogView::Clearance);
        assert_eq!(query.sort, SortKey::PriceLow);
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_query_flags_win_over_config() {
        let mut ctx = test_context();
        ctx.config.listing.default_view = CatalogView::Sales;
        ctx.config.listing.default_sort = Some(SortKey::Newest);

        let query = build_query(&list_args(), &ctx).unwrap();
        assert_eq!(query.view, CatalogView::Sales);
        assert_eq!(query.sort, SortKey::Newest);

        let mut args = list_args();
        args.sort = Some(SortKey::Brand);
        args.search = Some("elitebook".into());
        args.filter.filters = vec!["brands=HP".into()];
        let query = build_query(&args, &ctx).unwrap();
        assert_eq!(query.sort, SortKey::Brand);
        assert_eq!(query.search.as_deref(), Some("elitebook"));
        assert_eq!(query.filters.values(FilterKey::Brands), ["HP"]);
    }

    #[test]
    fn test_card_derived_attributes() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut product = Product::new("p-1", "ProBook 450", 75.0)
            .with_brand("HP")
            .with_category("Laptops")
            .with_in_stock(false)
            .with_created_at(Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap());
        product.original_price = Some(100.0);

        let card = ProductCard::from_product(&product, now, 30);
        assert_eq!(card.discount_percent, 25.0);
        assert_eq!(card.savings, Some(25.0));
        assert_eq!(card.stock, StockStatus::OutOfStock);
        assert_eq!(card.badge, CategoryBadge::Laptop);
        assert!(card.is_new);

        let card = ProductCard::from_product(&product, now, 7);
        assert!(!card.is_new);
    }
}
