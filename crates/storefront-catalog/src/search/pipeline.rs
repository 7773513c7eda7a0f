//! The listing pipeline.
//!
//! Given the loaded catalog and a [`ListingQuery`], produce the products to
//! render, in display order. Stages run in a fixed order: SEO-only
//! exclusion, page scope, sidebar filters, free-text search, sort. The
//! input slice is never reordered or mutated.

use std::cmp::Ordering;

use tracing::debug;

use crate::catalog::Product;
use crate::search::{ListingQuery, SortKey};

/// Run the pipeline.
pub fn run<'a>(products: &'a [Product], query: &ListingQuery) -> Vec<&'a Product> {
    let terms = SearchTerms::parse(query.search.as_deref());

    let mut listed: Vec<&Product> = visible(products)
        .filter(|p| query.view.includes(p))
        .filter(|p| query.filters.matches(p))
        .filter(|p| terms.as_ref().map_or(true, |t| t.matches(p)))
        .collect();

    sort_listing(&mut listed, query.sort);

    debug!(
        view = %query.view,
        sort = %query.sort,
        input = products.len(),
        output = listed.len(),
        "listing pipeline finished"
    );
    listed
}

/// Products allowed in any listing (everything not marked SEO-only).
pub fn visible(products: &[Product]) -> impl Iterator<Item = &Product> {
    products.iter().filter(|p| p.is_listed())
}

/// Lowercased words of a search query; every word must appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    /// `None` for an absent or blank query.
    pub fn parse(query: Option<&str>) -> Option<Self> {
        let words: Vec<String> = query?
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            None
        } else {
            Some(Self(words))
        }
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Substring match of every word against the product's searchable text.
    pub fn matches(&self, product: &Product) -> bool {
        let haystack = product.searchable_text();
        self.0.iter().all(|word| haystack.contains(word.as_str()))
    }
}

/// Sort in place: in-stock first, then by `key`. Ties keep their order.
pub fn sort_listing(items: &mut [&Product], key: SortKey) {
    items.sort_by(|a, b| compare(a, b, key));
}

/// Listing order of two products.
pub fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    let stock = b.is_in_stock().cmp(&a.is_in_stock());
    if stock != Ordering::Equal {
        return stock;
    }

    match key {
        SortKey::Name => locale_cmp(a.display_name(), b.display_name()),
        SortKey::PriceLow => sort_number(a.price).total_cmp(&sort_number(b.price)),
        SortKey::PriceHigh => sort_number(b.price).total_cmp(&sort_number(a.price)),
        SortKey::Brand => locale_cmp(
            a.brand.as_deref().unwrap_or(""),
            b.brand.as_deref().unwrap_or(""),
        ),
        SortKey::Newest => created_millis(b).cmp(&created_millis(a)),
        SortKey::Discount => {
            sort_number(b.discount_percent()).total_cmp(&sort_number(a.discount_percent()))
        }
    }
}

/// Values that cannot be compared sort as 0.
fn sort_number(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Missing timestamps sort as the epoch.
fn created_millis(product: &Product) -> i64 {
    product
        .created_at
        .map(|ts| ts.timestamp_millis())
        .unwrap_or(0)
}

/// Case-insensitive ordering, falling back to code point order for
/// strings that differ only in case.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
