//! Storefront listing pages as parameters of one pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::SortKey;

/// A catalog listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogView {
    /// `/products`: the whole catalog.
    #[default]
    Products,
    /// `/chromebook`
    Chromebook,
    /// `/workstation`
    Workstation,
    /// `/sales`: discounted or clearance items.
    Sales,
    /// `/discounted`
    Discounted,
    /// `/clearance`
    Clearance,
}

impl CatalogView {
    pub const ALL: [CatalogView; 6] = [
        CatalogView::Products,
        CatalogView::Chromebook,
        CatalogView::Workstation,
        CatalogView::Sales,
        CatalogView::Discounted,
        CatalogView::Clearance,
    ];

    /// Whether a product belongs on this page.
    pub fn includes(&self, product: &Product) -> bool {
        match self {
            CatalogView::Products => true,
            CatalogView::Chromebook => category_contains(product, "chromebook"),
            CatalogView::Workstation => {
                product.is_workstation || category_contains(product, "workstation")
            }
            CatalogView::Sales => product.is_discounted || product.is_clearance,
            CatalogView::Discounted => product.is_discounted,
            CatalogView::Clearance => product.is_clearance,
        }
    }

    /// Sort applied when the visitor has not picked one.
    pub fn default_sort(&self) -> SortKey {
        match self {
            CatalogView::Products | CatalogView::Chromebook | CatalogView::Workstation => {
                SortKey::Name
            }
            CatalogView::Sales | CatalogView::Discounted => SortKey::Discount,
            CatalogView::Clearance => SortKey::PriceLow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogView::Products => "products",
            CatalogView::Chromebook => "chromebook",
            CatalogView::Workstation => "workstation",
            CatalogView::Sales => "sales",
            CatalogView::Discounted => "discounted",
            CatalogView::Clearance => "clearance",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CatalogView::Products => "All Products",
            CatalogView::Chromebook => "Chromebooks",
            CatalogView::Workstation => "Workstations",
            CatalogView::Sales => "Sales",
            CatalogView::Discounted => "Discounted Products",
            CatalogView::Clearance => "Clearance",
        }
    }
}

impl FromStr for CatalogView {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('/');
        CatalogView::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownView(s.to_string()))
    }
}

/// Case-insensitive category test, independent of badge precedence.
fn category_contains(product: &Product, needle: &str) -> bool {
    product
        .category
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(needle))
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_scopes() {
        let chromebook = Product::new("c", "Chromebook 11", 9000.0).with_category("Chromebook");
        let mut workstation = Product::new("w", "ZBook", 90000.0).with_category("Laptops");
        workstation.is_workstation = true;
        let mut clearance = Product::new("x", "Old Mouse", 300.0).with_category("Mouse");
        clearance.is_clearance = true;

        assert!(CatalogView::Products.includes(&chromebook));
        assert!(CatalogView::Chromebook.includes(&chromebook));
        assert!(!CatalogView::Chromebook.includes(&workstation));
        assert!(CatalogView::Workstation.includes(&workstation));
        assert!(CatalogView::Sales.includes(&clearance));
        assert!(CatalogView::Clearance.includes(&clearance));
        assert!(!CatalogView::Discounted.includes(&clearance));
    }

    #[test]
    fn test_chromebook_page_ignores_badge_precedence() {
        let product =
            Product::new("c", "Acer Chromebook 314", 12000.0).with_category("Chromebook Laptops");
        assert_eq!(product.badge(), crate::catalog::CategoryBadge::Laptop);
        assert!(CatalogView::Chromebook.includes(&product));
        assert!(!CatalogView::Workstation.includes(&product));
    }

    #[test]
    fn test_view_parse() {
        assert_eq!("/chromebook".parse::<CatalogView>().unwrap(), CatalogView::Chromebook);
        assert_eq!("sales".parse::<CatalogView>().unwrap(), CatalogView::Sales);
        assert!("outlet".parse::<CatalogView>().is_err());
    }
}
