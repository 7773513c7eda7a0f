//! Raw product records as served by the product API.
//!
//! Rows written by different admin screens disagree on types and field
//! names: `in_stock` may be a boolean or the string `"false"`, quantities
//! and prices arrive as numbers or numeric strings, and several attributes
//! exist under two names. Everything is folded into [`Product`] once, here,
//! so predicates downstream never repeat the fallback chains.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Product, ProductSpecs};
use crate::error::CatalogError;
use crate::ids::ProductId;

/// A boolean that may have been stored as text.
///
/// Text is read for every flag, not only `in_stock`: `"true"` and
/// `"false"` (trimmed, any case) count as the boolean. Upstream only ever
/// compared `seo_only`, `is_discounted` and friends against the literal
/// `true`, and `is_active` against the literal `false`, so rows storing
/// those flags as text are read more generously here than the storefront
/// pages read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexBool {
    Bool(bool),
    Text(String),
    /// Any other JSON type; reads as absent.
    Other(serde_json::Value),
}

impl FlexBool {
    /// Interpret the value; `None` for text that is neither `true` nor
    /// `false` and for other JSON types.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlexBool::Bool(b) => Some(*b),
            FlexBool::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            FlexBool::Other(_) => None,
        }
    }

    /// Whether the stored text could not be interpreted.
    pub fn is_unrecognised(&self) -> bool {
        matches!(self, FlexBool::Text(_)) && self.as_bool().is_none()
    }

    /// Whether the value is neither a boolean nor text.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, FlexBool::Other(_))
    }
}

/// A number that may have been stored as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexNumber {
    Number(f64),
    Text(String),
    /// Any other JSON type; reads as absent.
    Other(serde_json::Value),
}

impl FlexNumber {
    /// Coerce to `f64`.
    ///
    /// Blank text counts as absent. Text that does not parse becomes `NaN`,
    /// which every numeric comparison treats as false.
    pub fn value(&self) -> Option<f64> {
        match self {
            FlexNumber::Number(n) => Some(*n),
            FlexNumber::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.parse::<f64>().unwrap_or(f64::NAN))
                }
            }
            FlexNumber::Other(_) => None,
        }
    }

    /// Whether the stored value is text that does not parse as a number.
    pub fn is_malformed(&self) -> bool {
        self.value().is_some_and(f64::is_nan)
    }

    /// Whether the value is neither a number nor text.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, FlexNumber::Other(_))
    }
}

/// Free-text attribute that some rows store as a bare number (e.g. `ram: 8`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexText {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    /// Arrays and objects; read as absent.
    Other(serde_json::Value),
}

impl FlexText {
    /// Trimmed text form; blank values yield `None`.
    pub fn to_text(&self) -> Option<String> {
        let s = match self {
            FlexText::Text(s) => s.trim().to_string(),
            FlexText::Number(n) => n.to_string(),
            FlexText::Bool(b) => b.to_string(),
            FlexText::Other(_) => return None,
        };
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    /// Timestamp stored as text. Other JSON types (including bare epoch
    /// numbers) read as absent.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FlexText::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Whether the value is an array or object.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, FlexText::Other(_))
    }
}

/// Primary key as either an integer or a string (UUID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl FlexId {
    fn to_product_id(&self) -> Option<ProductId> {
        match self {
            FlexId::Int(n) => Some(ProductId::from(*n)),
            FlexId::Text(s) if !s.trim().is_empty() => Some(ProductId::new(s.trim())),
            FlexId::Text(_) | FlexId::Other(_) => None,
        }
    }
}

/// One product row exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub id: Option<FlexId>,
    pub name: Option<FlexText>,
    pub brand: Option<FlexText>,
    pub category: Option<FlexText>,
    pub category_id: Option<FlexText>,
    pub description: Option<FlexText>,

    pub price: Option<FlexNumber>,
    pub original_price: Option<FlexNumber>,
    pub discount_percentage: Option<FlexNumber>,

    pub is_discounted: Option<FlexBool>,
    pub is_clearance: Option<FlexBool>,
    pub is_featured: Option<FlexBool>,
    pub featured: Option<FlexBool>,
    pub is_active: Option<FlexBool>,
    pub is_workstation: Option<FlexBool>,
    pub seo_only: Option<FlexBool>,
    pub in_stock: Option<FlexBool>,
    pub stock_quantity: Option<FlexNumber>,

    pub processor: Option<FlexText>,
    pub ram: Option<FlexText>,
    pub hdd: Option<FlexText>,
    pub storage: Option<FlexText>,
    pub display_size: Option<FlexText>,
    pub display: Option<FlexText>,
    pub resolution: Option<FlexText>,
    pub touch_type: Option<FlexText>,
    pub os: Option<FlexText>,
    pub generation: Option<FlexText>,
    pub graphics: Option<FlexText>,
    pub ram_type: Option<FlexText>,
    pub ram_capacity: Option<FlexText>,
    pub ram_speed: Option<FlexText>,
    pub ram_form_factor: Option<FlexText>,
    pub ram_condition: Option<FlexText>,
    pub ram_warranty: Option<FlexText>,
    pub ssd_capacity: Option<FlexText>,
    pub ssd_form_factor: Option<FlexText>,
    pub ssd_interface: Option<FlexText>,
    pub ssd_condition: Option<FlexText>,
    pub ssd_warranty: Option<FlexText>,
    pub aue_year: Option<FlexText>,
    pub auto_update_expiration: Option<FlexText>,

    pub created_at: Option<FlexText>,
}

fn text(field: &Option<FlexText>) -> Option<String> {
    field.as_ref().and_then(FlexText::to_text)
}

/// First non-blank of two synonymous fields.
fn either(preferred: &Option<FlexText>, fallback: &Option<FlexText>) -> Option<String> {
    text(preferred).or_else(|| text(fallback))
}

fn number(field: &Option<FlexNumber>) -> Option<f64> {
    field.as_ref().and_then(FlexNumber::value)
}

fn flag(field: &Option<FlexBool>) -> Option<bool> {
    field.as_ref().and_then(FlexBool::as_bool)
}

impl RawProduct {
    /// Resolved category, `category_id` preferred over `category`.
    pub fn resolved_category(&self) -> Option<String> {
        either(&self.category_id, &self.category)
    }

    /// Fold the row into the canonical [`Product`].
    ///
    /// Returns `None` when the row has no usable id.
    pub fn into_product(self) -> Option<Product> {
        let id = self.id.as_ref().and_then(FlexId::to_product_id)?;

        let specs = ProductSpecs {
            processor: text(&self.processor),
            ram: text(&self.ram),
            storage: either(&self.hdd, &self.storage),
            display: either(&self.display_size, &self.display),
            resolution: text(&self.resolution),
            touch_type: text(&self.touch_type),
            os: text(&self.os),
            generation: text(&self.generation),
            graphics: text(&self.graphics),
            ram_type: text(&self.ram_type),
            ram_capacity: text(&self.ram_capacity),
            ram_speed: text(&self.ram_speed),
            ram_form_factor: text(&self.ram_form_factor),
            ram_condition: text(&self.ram_condition),
            ram_warranty: text(&self.ram_warranty),
            ssd_capacity: text(&self.ssd_capacity),
            ssd_form_factor: text(&self.ssd_form_factor),
            ssd_interface: text(&self.ssd_interface),
            ssd_condition: text(&self.ssd_condition),
            ssd_warranty: text(&self.ssd_warranty),
            aue_year: either(&self.aue_year, &self.auto_update_expiration),
        };

        Some(Product {
            id,
            name: text(&self.name),
            brand: text(&self.brand),
            category: self.resolved_category(),
            description: text(&self.description),
            price: number(&self.price).unwrap_or(0.0),
            original_price: number(&self.original_price),
            discount_percentage: number(&self.discount_percentage),
            is_discounted: flag(&self.is_discounted) == Some(true),
            is_clearance: flag(&self.is_clearance) == Some(true),
            is_featured: flag(&self.is_featured) == Some(true)
                || flag(&self.featured) == Some(true),
            is_workstation: flag(&self.is_workstation) == Some(true),
            is_active: flag(&self.is_active) != Some(false),
            seo_only: flag(&self.seo_only) == Some(true),
            in_stock: flag(&self.in_stock),
            stock_quantity: number(&self.stock_quantity),
            specs,
            created_at: self.created_at.as_ref().and_then(FlexText::timestamp),
        })
    }
}

/// Parse the timestamp formats seen in product rows.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD HH:MM:SS[.f]` (taken as UTC) and a
/// bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize an upstream payload into canonical products.
///
/// Anything other than a JSON array yields an empty catalog. Elements that
/// are not objects or carry no id are skipped.
pub fn load_products(payload: &serde_json::Value) -> Vec<Product> {
    let Some(items) = payload.as_array() else {
        debug!("product payload is not an array, treating as empty");
        return Vec::new();
    };

    let mut products = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let raw = match RawProduct::deserialize(item) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable product row");
                continue;
            }
        };
        match raw.into_product() {
            Some(product) => products.push(product),
            None => warn!(index, "skipping product row without id"),
        }
    }

    debug!(rows = items.len(), loaded = products.len(), "normalized product payload");
    products
}

/// Parse a JSON document and normalize it with [`load_products`].
pub fn parse_products(json: &str) -> Result<Vec<Product>, CatalogError> {
    let payload: serde_json::Value = serde_json::from_str(json)?;
    Ok(load_products(&payload))
}
