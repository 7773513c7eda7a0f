//! Pagination and facets for rendered listings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::{pipeline, CatalogView, FilterKey, FilterSelection};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `page` is at least 1, `per_page` is clamped
    /// to 1..=100.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// The items belonging to this page.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    /// Get page numbers for display (e.g., [1, 2, 3, ..., 10]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset().saturating_add(1)
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T: Clone> ListingPage<T> {
    /// Cut one page out of a complete listing.
    pub fn paginate(all: &[T], page: usize, per_page: usize) -> Self {
        let pagination = Pagination::new(page, per_page, all.len());
        Self {
            items: pagination.slice(all).to_vec(),
            pagination,
        }
    }
}

impl<T> ListingPage<T> {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A single facet value with count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value as first seen in the catalog.
    pub value: String,
    /// Number of products carrying it.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// Available values for one filter category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    pub key: FilterKey,
    pub name: String,
    pub values: Vec<FacetValue>,
}

/// Observed price bounds, for the price slider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Sidebar options for a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Facets {
    pub facets: Vec<Facet>,
    pub price: Option<PriceBounds>,
}

impl Facets {
    /// Collect facet values over the listed products of a page.
    ///
    /// Values are merged case-insensitively, ordered by count (descending)
    /// then value. Categories with no values are omitted.
    pub fn collect(products: &[Product], view: CatalogView, selection: &FilterSelection) -> Self {
        let scoped: Vec<&Product> = pipeline::visible(products)
            .filter(|p| view.includes(p))
            .collect();

        let facets = FilterKey::ALL
            .into_iter()
            .filter_map(|key| facet_for(key, &scoped, selection))
            .collect();

        let price = scoped
            .iter()
            .map(|p| p.price)
            .filter(|price| price.is_finite())
            .fold(None, |bounds: Option<PriceBounds>, price| {
                Some(match bounds {
                    Some(b) => PriceBounds {
                        min: b.min.min(price),
                        max: b.max.max(price),
                    },
                    None => PriceBounds { min: price, max: price },
                })
            });

        Self { facets, price }
    }

    /// Facet for one category, if present.
    pub fn get(&self, key: FilterKey) -> Option<&Facet> {
        self.facets.iter().find(|f| f.key == key)
    }
}

fn facet_for(key: FilterKey, products: &[&Product], selection: &FilterSelection) -> Option<Facet> {
    // lowercase value -> (display form, count)
    let mut counts: BTreeMap<String, (String, usize)> = BTreeMap::new();
    for product in products {
        let Some(value) = key.value_of(product).map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        counts
            .entry(value.to_lowercase())
            .or_insert_with(|| (value.to_string(), 0))
            .1 += 1;
    }

    if counts.is_empty() {
        return None;
    }

    let selected = selection.values(key);
    let mut values: Vec<FacetValue> = counts
        .into_iter()
        .map(|(lower, (value, count))| FacetValue {
            selected: selected.iter().any(|s| s.to_lowercase() == lower),
            value,
            count,
        })
        .collect();
    values.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.value.to_lowercase().cmp(&b.value.to_lowercase()))
    });

    Some(Facet {
        key,
        name: key.label().to_string(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(0, 500, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 100);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let p = Pagination::new(1, 10, 30);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_huge_page() {
        let p = Pagination::new(usize::MAX, 24, 5);
        assert_eq!(p.offset(), usize::MAX);
        assert_eq!(p.end_item(), 5);
        assert!(!p.has_next);

        let items: Vec<u32> = (1..=5).collect();
        assert!(ListingPage::paginate(&items, usize::MAX, 24).is_empty());
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=25).collect();
        let page = ListingPage::paginate(&items, 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.len(), 5);

        let beyond = ListingPage::paginate(&items, 9, 10);
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_facets_collect() {
        let mut hidden = Product::new("4", "Secret", 1.0).with_brand("Apple");
        hidden.seo_only = true;
        let products = vec![
            Product::new("1", "EliteBook", 30000.0).with_brand("HP"),
            Product::new("2", "ProBook", 20000.0).with_brand("hp "),
            Product::new("3", "Latitude", 25000.0).with_brand("Dell"),
            hidden,
        ];
        let selection = FilterSelection::new().with_values(FilterKey::Brands, ["Dell"]);

        let facets = Facets::collect(&products, CatalogView::Products, &selection);
        let brands = facets.get(FilterKey::Brands).unwrap();

        assert_eq!(brands.name, "Brand");
        assert_eq!(brands.values.len(), 2);
        assert_eq!(brands.values[0].value, "HP");
        assert_eq!(brands.values[0].count, 2);
        assert!(!brands.values[0].selected);
        assert_eq!(brands.values[1].value, "Dell");
        assert!(brands.values[1].selected);

        assert!(facets.get(FilterKey::Processors).is_none());
        assert_eq!(facets.price, Some(PriceBounds { min: 20000.0, max: 30000.0 }));
    }
}
