//! Listing query: view, filters, sort and search text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::search::{CatalogView, FilterSelection};

/// Sort options for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name A-Z.
    #[default]
    Name,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Brand A-Z.
    Brand,
    /// Newest first.
    Newest,
    /// Largest discount first.
    Discount,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Brand,
        SortKey::Newest,
        SortKey::Discount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Brand => "brand",
            SortKey::Newest => "newest",
            SortKey::Discount => "discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Brand => "Brand: A-Z",
            SortKey::Newest => "Newest",
            SortKey::Discount => "Biggest Discount",
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that determines one rendered listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Page the listing belongs to.
    #[serde(default)]
    pub view: CatalogView,
    /// Sidebar filters.
    #[serde(default)]
    pub filters: FilterSelection,
    /// Sort option.
    #[serde(default)]
    pub sort: SortKey,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListingQuery {
    /// Query for the full catalog, sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for a page, using the page's default sort.
    pub fn for_view(view: CatalogView) -> Self {
        Self {
            view,
            sort: view.default_sort(),
            ..Self::default()
        }
    }

    /// Set the filters.
    pub fn with_filters(mut self, filters: FilterSelection) -> Self {
        self.filters = filters;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set the search text. Blank text clears it.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.search = if q.trim().is_empty() { None } else { Some(q) };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FilterKey;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("discount".parse::<SortKey>().unwrap(), SortKey::Discount);
        assert!(matches!(
            "cheapest".parse::<SortKey>(),
            Err(CatalogError::UnknownSortKey(_))
        ));
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_sort_key_serde_matches_as_str() {
        for key in SortKey::ALL {
            let json = serde_json::to_value(key).unwrap();
            assert_eq!(json, serde_json::Value::from(key.as_str()));
        }
    }

    #[test]
    fn test_query_builder() {
        let query = ListingQuery::for_view(CatalogView::Clearance)
            .with_filters(FilterSelection::new().with_values(FilterKey::Brands, ["HP"]))
            .with_search("elitebook");

        assert_eq!(query.view, CatalogView::Clearance);
        assert_eq!(query.sort, SortKey::PriceLow);
        assert_eq!(query.search.as_deref(), Some("elitebook"));
        assert_eq!(query.with_search("   ").search, None);
    }

    #[test]
    fn test_query_from_json() {
        let query: ListingQuery = serde_json::from_str(
            r#"{"view": "sales", "sort": "price-high", "filters": {"brands": ["Dell"]}}"#,
        )
        .unwrap();
        assert_eq!(query.view, CatalogView::Sales);
        assert_eq!(query.sort, SortKey::PriceHigh);
        assert_eq!(query.filters.values(FilterKey::Brands), ["Dell"]);
    }
}
