//! Canonical product type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{inventory, pricing, CategoryBadge};
use crate::ids::ProductId;

/// Products created within this many days carry the "new" badge.
pub const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Category-specific descriptive attributes.
///
/// Laptop rows fill the processor/display family, memory and drive
/// accessories fill the `ram_*` / `ssd_*` family, Chromebooks add the
/// auto-update expiration year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub processor: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub display: Option<String>,
    pub resolution: Option<String>,
    pub touch_type: Option<String>,
    pub os: Option<String>,
    pub generation: Option<String>,
    pub graphics: Option<String>,
    pub ram_type: Option<String>,
    pub ram_capacity: Option<String>,
    pub ram_speed: Option<String>,
    pub ram_form_factor: Option<String>,
    pub ram_condition: Option<String>,
    pub ram_warranty: Option<String>,
    pub ssd_capacity: Option<String>,
    pub ssd_form_factor: Option<String>,
    pub ssd_interface: Option<String>,
    pub ssd_condition: Option<String>,
    pub ssd_warranty: Option<String>,
    pub aue_year: Option<String>,
}

/// A product in the catalog, after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: Option<String>,
    /// Manufacturer.
    pub brand: Option<String>,
    /// Category, `category_id` preferred over `category`.
    pub category: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Selling price. Missing prices are 0, malformed prices are `NaN`.
    pub price: f64,
    /// Price before markdown.
    pub original_price: Option<f64>,
    /// Admin-set discount, used verbatim when `is_discounted`.
    pub discount_percentage: Option<f64>,
    pub is_discounted: bool,
    pub is_clearance: bool,
    pub is_featured: bool,
    pub is_workstation: bool,
    pub is_active: bool,
    /// Hidden from every listing, reachable by direct link only.
    pub seo_only: bool,
    /// Explicit stock flag, `None` when absent or unreadable.
    pub in_stock: Option<bool>,
    /// Units on hand. `NaN` when the stored text is not a number.
    pub stock_quantity: Option<f64>,
    pub specs: ProductSpecs,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create an active product with a name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            brand: None,
            category: None,
            description: None,
            price,
            original_price: None,
            discount_percentage: None,
            is_discounted: false,
            is_clearance: false,
            is_featured: false,
            is_workstation: false,
            is_active: true,
            seo_only: false,
            in_stock: None,
            stock_quantity: None,
            specs: ProductSpecs::default(),
            created_at: None,
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the explicit stock flag.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Name, or empty when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the product may appear in catalog listings.
    pub fn is_listed(&self) -> bool {
        !self.seo_only
    }

    /// Discount percent shown on the card.
    pub fn discount_percent(&self) -> f64 {
        pricing::discount_percent(self)
    }

    /// Whether the product can be bought right now.
    pub fn is_in_stock(&self) -> bool {
        inventory::is_in_stock(self)
    }

    /// Whether the product was created within [`NEW_PRODUCT_WINDOW_DAYS`].
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        self.is_new_within(now, NEW_PRODUCT_WINDOW_DAYS)
    }

    /// Whether the product was created at most `days` days before `now`.
    pub fn is_new_within(&self, now: DateTime<Utc>, days: i64) -> bool {
        match self.created_at {
            Some(created) => {
                let age_days = (now - created).num_milliseconds() as f64 / 86_400_000.0;
                age_days <= days as f64
            }
            None => false,
        }
    }

    /// Category badge shown on the card.
    pub fn badge(&self) -> CategoryBadge {
        CategoryBadge::classify(self)
    }

    /// Lowercased text matched by free-text search.
    pub fn searchable_text(&self) -> String {
        [
            self.name.as_deref(),
            self.brand.as_deref(),
            self.specs.processor.as_deref(),
            self.specs.ram.as_deref(),
            self.specs.storage.as_deref(),
            self.specs.display.as_deref(),
            self.category.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_product_creation() {
        let product = Product::new("p-1", "EliteBook 840", 42000.0).with_brand("HP");
        assert_eq!(product.display_name(), "EliteBook 840");
        assert_eq!(product.brand.as_deref(), Some("HP"));
        assert!(product.is_active);
        assert!(product.is_listed());
    }

    #[test]
    fn test_is_new_window() {
        let now = Utc::now();
        let fresh = Product::new("a", "A", 1.0).with_created_at(now - Duration::days(3));
        let edge = Product::new("b", "B", 1.0).with_created_at(now - Duration::days(30));
        let old = Product::new("c", "C", 1.0).with_created_at(now - Duration::days(31));
        let undated = Product::new("d", "D", 1.0);

        assert!(fresh.is_new(now));
        assert!(edge.is_new(now));
        assert!(!old.is_new(now));
        assert!(!undated.is_new(now));
        assert!(old.is_new_within(now, 45));
    }

    #[test]
    fn test_searchable_text() {
        let mut product = Product::new("a", "ThinkPad T480", 1.0).with_brand("Lenovo");
        product.specs.processor = Some("Core i5".into());
        product.specs.ram = Some("16GB".into());
        let text = product.searchable_text();
        assert_eq!(text, "thinkpad t480 lenovo core i5 16gb");
    }
}
