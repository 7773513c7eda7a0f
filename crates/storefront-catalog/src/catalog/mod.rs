//! Product catalog module.
//!
//! Contains the canonical product type, the adapter from raw API rows, and
//! the derived attributes shown on product cards.

mod category;
pub mod inventory;
pub mod pricing;
mod product;
pub mod raw;

pub use category::CategoryBadge;
pub use inventory::{is_in_stock, StockStatus};
pub use pricing::discount_percent;
pub use product::{Product, ProductSpecs, NEW_PRODUCT_WINDOW_DAYS};
pub use raw::{load_products, parse_products, RawProduct};
