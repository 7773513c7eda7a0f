//! Product catalog model and listing pipeline for the storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: the canonical [`Product`], the adapter from raw API rows,
//!   and derived card attributes (discount, stock, "new", category badge)
//! - **Search**: the filter/sort/search pipeline, page presets, facets and
//!   pagination
//! - **Audit**: strict-mode reporting of malformed rows
//!
//! # Example
//!
//! ```rust
//! use storefront_catalog::prelude::*;
//!
//! let payload = serde_json::json!([
//!     {"id": 1, "name": "EliteBook 840", "brand": "HP", "price": 30000, "in_stock": true},
//!     {"id": 2, "name": "Latitude 5490", "brand": "Dell", "price": 20000, "in_stock": "false"},
//!     {"id": 3, "name": "ProBook 450", "brand": "HP", "price": 25000},
//! ]);
//! let products = load_products(&payload);
//!
//! let query = ListingQuery::new()
//!     .with_filters(FilterSelection::new().with_values(FilterKey::Brands, ["HP"]))
//!     .with_sort(SortKey::PriceLow);
//!
//! let listed = run(&products, &query);
//! let names: Vec<&str> = listed.iter().map(|p| p.display_name()).collect();
//! assert_eq!(names, ["ProBook 450", "EliteBook 840"]);
//! ```

pub mod audit;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod search;

pub use catalog::{Product, ProductSpecs};
pub use error::CatalogError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{
        discount_percent, is_in_stock, load_products, parse_products, CategoryBadge, Product,
        ProductSpecs, RawProduct, StockStatus, NEW_PRODUCT_WINDOW_DAYS,
    };

    // Search
    pub use crate::search::{
        run, CatalogView, Facets, FilterKey, FilterSelection, ListingPage, ListingQuery,
        Pagination, PriceRange, SortKey,
    };

    // Audit
    pub use crate::audit::{audit_catalog, AuditReport, IssueKind, RecordIssue};
}
