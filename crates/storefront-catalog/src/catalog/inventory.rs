//! Stock determination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Stock status shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn of(product: &Product) -> Self {
        if is_in_stock(product) {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// Whether a product can be bought.
///
/// Any one of these marks it out of stock: the product is inactive, the
/// stock flag is false (boolean or the string `"false"`), or the stock
/// quantity is zero or negative. A quantity that did not parse (`NaN`)
/// excludes nothing. With none of the fields present the product is in
/// stock.
pub fn is_in_stock(product: &Product) -> bool {
    if !product.is_active {
        return false;
    }
    if product.in_stock == Some(false) {
        return false;
    }
    if let Some(quantity) = product.stock_quantity {
        if quantity <= 0.0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Product {
        Product::new("p", "Item", 10.0)
    }

    #[test]
    fn test_defaults_to_in_stock() {
        assert!(is_in_stock(&blank()));
    }

    #[test]
    fn test_inactive_is_out_of_stock() {
        let mut p = blank();
        p.is_active = false;
        p.in_stock = Some(true);
        assert!(!is_in_stock(&p));
    }

    #[test]
    fn test_stock_flag() {
        assert!(!is_in_stock(&blank().with_in_stock(false)));
        assert!(is_in_stock(&blank().with_in_stock(true)));
    }

    #[test]
    fn test_stock_quantity() {
        let mut p = blank();
        p.stock_quantity = Some(0.0);
        assert!(!is_in_stock(&p));

        p.stock_quantity = Some(-2.0);
        assert!(!is_in_stock(&p));

        p.stock_quantity = Some(3.0);
        assert!(is_in_stock(&p));

        p.stock_quantity = Some(f64::NAN);
        assert!(is_in_stock(&p));
    }

    #[test]
    fn test_any_failing_check_wins() {
        let mut p = blank().with_in_stock(true);
        p.stock_quantity = Some(0.0);
        assert!(!is_in_stock(&p));
        assert_eq!(StockStatus::of(&p), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(&p).label(), "Out of Stock");
    }
}
