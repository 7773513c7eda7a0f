//! Category badge classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Product;

/// Badge shown on a product card, derived from its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryBadge {
    Workstation,
    Laptop,
    Chromebook,
    Accessory,
    Ram,
    Ssd,
    Keyboard,
    Mouse,
    Ups,
    Desktop,
    Product,
}

/// Substring rules checked in order after the workstation check.
const RULES: &[(&str, CategoryBadge)] = &[
    ("laptop", CategoryBadge::Laptop),
    ("chromebook", CategoryBadge::Chromebook),
    ("accessor", CategoryBadge::Accessory),
    ("ram", CategoryBadge::Ram),
    ("ssd", CategoryBadge::Ssd),
    ("keyboard", CategoryBadge::Keyboard),
    ("mouse", CategoryBadge::Mouse),
    ("ups", CategoryBadge::Ups),
    ("desktop", CategoryBadge::Desktop),
];

impl CategoryBadge {
    /// Classify a product. The first matching rule wins.
    pub fn classify(product: &Product) -> Self {
        let category = product
            .category
            .as_deref()
            .unwrap_or("")
            .to_lowercase();

        if product.is_workstation || category.contains("workstation") {
            return CategoryBadge::Workstation;
        }

        RULES
            .iter()
            .find(|(needle, _)| category.contains(needle))
            .map(|(_, badge)| *badge)
            .unwrap_or(CategoryBadge::Product)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryBadge::Workstation => "Workstation",
            CategoryBadge::Laptop => "Laptop",
            CategoryBadge::Chromebook => "Chromebook",
            CategoryBadge::Accessory => "Accessory",
            CategoryBadge::Ram => "RAM",
            CategoryBadge::Ssd => "SSD",
            CategoryBadge::Keyboard => "Keyboard",
            CategoryBadge::Mouse => "Mouse",
            CategoryBadge::Ups => "UPS",
            CategoryBadge::Desktop => "Desktop",
            CategoryBadge::Product => "Product",
        }
    }
}

impl fmt::Display for CategoryBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_category(category: &str) -> Product {
        Product::new("p", "Item", 1.0).with_category(category)
    }

    #[test]
    fn test_basic_categories() {
        assert_eq!(CategoryBadge::classify(&in_category("Laptops")), CategoryBadge::Laptop);
        assert_eq!(CategoryBadge::classify(&in_category("chromebook")), CategoryBadge::Chromebook);
        assert_eq!(CategoryBadge::classify(&in_category("Accessories")), CategoryBadge::Accessory);
        assert_eq!(CategoryBadge::classify(&in_category("RAM")), CategoryBadge::Ram);
        assert_eq!(CategoryBadge::classify(&in_category("NVMe SSD")), CategoryBadge::Ssd);
        assert_eq!(CategoryBadge::classify(&in_category("UPS")), CategoryBadge::Ups);
        assert_eq!(CategoryBadge::classify(&in_category("Desktops")), CategoryBadge::Desktop);
    }

    #[test]
    fn test_workstation_first() {
        let mut flagged = in_category("Laptops");
        flagged.is_workstation = true;
        assert_eq!(CategoryBadge::classify(&flagged), CategoryBadge::Workstation);
        assert_eq!(
            CategoryBadge::classify(&in_category("Mobile Workstation Laptop")),
            CategoryBadge::Workstation
        );
    }

    #[test]
    fn test_first_rule_wins() {
        // "laptop" outranks "accessories"
        assert_eq!(
            CategoryBadge::classify(&in_category("Laptop Accessories")),
            CategoryBadge::Laptop
        );
    }

    #[test]
    fn test_default_badge() {
        assert_eq!(CategoryBadge::classify(&Product::new("p", "Item", 1.0)), CategoryBadge::Product);
        assert_eq!(CategoryBadge::classify(&in_category("Monitors")), CategoryBadge::Product);
        assert_eq!(CategoryBadge::Ram.to_string(), "RAM");
    }
}
