//! Search module.
//!
//! Contains the listing pipeline and the types that drive it: filters,
//! sort keys, page presets, pagination and facets.

mod filter;
pub mod pipeline;
mod query;
mod results;
mod view;

pub use filter::{value_matches, FilterKey, FilterSelection, PriceRange};
pub use pipeline::{run, SearchTerms};
pub use query::{ListingQuery, SortKey};
pub use results::{Facet, FacetValue, Facets, ListingPage, Pagination, PriceBounds};
pub use view::CatalogView;
