//! Discount calculation.

use crate::catalog::Product;

/// Round half toward positive infinity, matching how storefront cards have
/// always displayed percentages.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Discount percent for a product.
///
/// An admin-set `discount_percentage` on a discounted product wins and is
/// returned unchanged, without clamping. Otherwise the percent is derived
/// from `original_price` when it exceeds the selling price. Everything else
/// is 0.
pub fn discount_percent(product: &Product) -> f64 {
    if product.is_discounted {
        if let Some(pct) = product.discount_percentage.filter(|p| !p.is_nan()) {
            return pct;
        }
    }

    match product.original_price {
        Some(original) if original > product.price => {
            round_half_up((original - product.price) / original * 100.0)
        }
        _ => 0.0,
    }
}

/// Amount saved against the original price, if any.
pub fn savings(product: &Product) -> Option<f64> {
    product
        .original_price
        .filter(|original| *original > product.price)
        .map(|original| original - product.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: f64, original: Option<f64>) -> Product {
        let mut p = Product::new("p", "Item", price);
        p.original_price = original;
        p
    }

    #[test]
    fn test_override_wins() {
        let mut p = priced(100.0, Some(200.0));
        p.is_discounted = true;
        p.discount_percentage = Some(25.0);
        assert_eq!(discount_percent(&p), 25.0);
    }

    #[test]
    fn test_override_not_clamped() {
        let mut p = priced(100.0, None);
        p.is_discounted = true;
        p.discount_percentage = Some(140.0);
        assert_eq!(discount_percent(&p), 140.0);
    }

    #[test]
    fn test_override_ignored_without_flag() {
        let mut p = priced(75.0, Some(100.0));
        p.discount_percentage = Some(60.0);
        assert_eq!(discount_percent(&p), 25.0);
    }

    #[test]
    fn test_computed_from_original_price() {
        assert_eq!(discount_percent(&priced(75.0, Some(100.0))), 25.0);
        // 1/3 off rounds to 33
        assert_eq!(discount_percent(&priced(200.0, Some(300.0))), 33.0);
        // 12.5 rounds up
        assert_eq!(discount_percent(&priced(87.5, Some(100.0))), 13.0);
    }

    #[test]
    fn test_no_discount() {
        assert_eq!(discount_percent(&priced(100.0, None)), 0.0);
        assert_eq!(discount_percent(&priced(100.0, Some(100.0))), 0.0);
        assert_eq!(discount_percent(&priced(120.0, Some(100.0))), 0.0);
        assert_eq!(discount_percent(&priced(100.0, Some(f64::NAN))), 0.0);
    }

    #[test]
    fn test_savings() {
        assert_eq!(savings(&priced(75.0, Some(100.0))), Some(25.0));
        assert_eq!(savings(&priced(100.0, Some(90.0))), None);
    }
}
