//! Filter selection types.
//!
//! A [`FilterSelection`] is the typed form of the plain filter object the
//! listing pages build from their sidebar: list-valued categories keyed by
//! [`FilterKey`], a price range, and the `inStock` / `featured` toggles.
//! Categories combine with AND; values within one category combine with OR.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Product;
use crate::error::CatalogError;

/// A list-valued filter category and the product attribute it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Brands,
    Processors,
    Ram,
    Storage,
    Display,
    Generation,
    Resolution,
    TouchType,
    OperatingSystem,
    AueYear,
    Graphics,
    RamType,
    RamCapacity,
    RamSpeed,
    RamFormFactor,
    RamCondition,
    RamWarranty,
    SsdCapacity,
    SsdFormFactor,
    SsdInterface,
    SsdCondition,
    SsdWarranty,
}

impl FilterKey {
    pub const ALL: [FilterKey; 22] = [
        FilterKey::Brands,
        FilterKey::Processors,
        FilterKey::Ram,
        FilterKey::Storage,
        FilterKey::Display,
        FilterKey::Generation,
        FilterKey::Resolution,
        FilterKey::TouchType,
        FilterKey::OperatingSystem,
        FilterKey::AueYear,
        FilterKey::Graphics,
        FilterKey::RamType,
        FilterKey::RamCapacity,
        FilterKey::RamSpeed,
        FilterKey::RamFormFactor,
        FilterKey::RamCondition,
        FilterKey::RamWarranty,
        FilterKey::SsdCapacity,
        FilterKey::SsdFormFactor,
        FilterKey::SsdInterface,
        FilterKey::SsdCondition,
        FilterKey::SsdWarranty,
    ];

    /// Resolve a filter object key, including the legacy aliases.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = match key {
            "brands" => FilterKey::Brands,
            "processors" => FilterKey::Processors,
            "ram" => FilterKey::Ram,
            "storage" | "hdd" => FilterKey::Storage,
            "display" => FilterKey::Display,
            "generation" => FilterKey::Generation,
            "resolution" | "displayType" => FilterKey::Resolution,
            "touchscreen" | "touchType" => FilterKey::TouchType,
            "operatingSystem" => FilterKey::OperatingSystem,
            "aueYear" => FilterKey::AueYear,
            "graphics" => FilterKey::Graphics,
            "ramType" => FilterKey::RamType,
            "ramCapacity" => FilterKey::RamCapacity,
            "ramSpeed" => FilterKey::RamSpeed,
            "ramFormFactor" => FilterKey::RamFormFactor,
            "ramCondition" => FilterKey::RamCondition,
            "ramWarranty" => FilterKey::RamWarranty,
            "ssdCapacity" => FilterKey::SsdCapacity,
            "ssdFormFactor" => FilterKey::SsdFormFactor,
            "ssdInterface" => FilterKey::SsdInterface,
            "ssdCondition" => FilterKey::SsdCondition,
            "ssdWarranty" => FilterKey::SsdWarranty,
            _ => return None,
        };
        Some(key)
    }

    /// Canonical key in the filter object.
    pub fn as_key(&self) -> &'static str {
        match self {
            FilterKey::Brands => "brands",
            FilterKey::Processors => "processors",
            FilterKey::Ram => "ram",
            FilterKey::Storage => "storage",
            FilterKey::Display => "display",
            FilterKey::Generation => "generation",
            FilterKey::Resolution => "resolution",
            FilterKey::TouchType => "touchType",
            FilterKey::OperatingSystem => "operatingSystem",
            FilterKey::AueYear => "aueYear",
            FilterKey::Graphics => "graphics",
            FilterKey::RamType => "ramType",
            FilterKey::RamCapacity => "ramCapacity",
            FilterKey::RamSpeed => "ramSpeed",
            FilterKey::RamFormFactor => "ramFormFactor",
            FilterKey::RamCondition => "ramCondition",
            FilterKey::RamWarranty => "ramWarranty",
            FilterKey::SsdCapacity => "ssdCapacity",
            FilterKey::SsdFormFactor => "ssdFormFactor",
            FilterKey::SsdInterface => "ssdInterface",
            FilterKey::SsdCondition => "ssdCondition",
            FilterKey::SsdWarranty => "ssdWarranty",
        }
    }

    /// Sidebar heading.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Brands => "Brand",
            FilterKey::Processors => "Processor",
            FilterKey::Ram => "RAM",
            FilterKey::Storage => "Storage",
            FilterKey::Display => "Display Size",
            FilterKey::Generation => "Generation",
            FilterKey::Resolution => "Resolution",
            FilterKey::TouchType => "Touchscreen",
            FilterKey::OperatingSystem => "Operating System",
            FilterKey::AueYear => "Auto Update Expiration",
            FilterKey::Graphics => "Graphics",
            FilterKey::RamType => "RAM Type",
            FilterKey::RamCapacity => "RAM Capacity",
            FilterKey::RamSpeed => "RAM Speed",
            FilterKey::RamFormFactor => "RAM Form Factor",
            FilterKey::RamCondition => "RAM Condition",
            FilterKey::RamWarranty => "RAM Warranty",
            FilterKey::SsdCapacity => "SSD Capacity",
            FilterKey::SsdFormFactor => "SSD Form Factor",
            FilterKey::SsdInterface => "SSD Interface",
            FilterKey::SsdCondition => "SSD Condition",
            FilterKey::SsdWarranty => "SSD Warranty",
        }
    }

    /// The product attribute this category matches against.
    pub fn value_of<'a>(&self, product: &'a Product) -> Option<&'a str> {
        let specs = &product.specs;
        let value = match self {
            FilterKey::Brands => &product.brand,
            FilterKey::Processors => &specs.processor,
            FilterKey::Ram => &specs.ram,
            FilterKey::Storage => &specs.storage,
            FilterKey::Display => &specs.display,
            FilterKey::Generation => &specs.generation,
            FilterKey::Resolution => &specs.resolution,
            FilterKey::TouchType => &specs.touch_type,
            FilterKey::OperatingSystem => &specs.os,
            FilterKey::AueYear => &specs.aue_year,
            FilterKey::Graphics => &specs.graphics,
            FilterKey::RamType => &specs.ram_type,
            FilterKey::RamCapacity => &specs.ram_capacity,
            FilterKey::RamSpeed => &specs.ram_speed,
            FilterKey::RamFormFactor => &specs.ram_form_factor,
            FilterKey::RamCondition => &specs.ram_condition,
            FilterKey::RamWarranty => &specs.ram_warranty,
            FilterKey::SsdCapacity => &specs.ssd_capacity,
            FilterKey::SsdFormFactor => &specs.ssd_form_factor,
            FilterKey::SsdInterface => &specs.ssd_interface,
            FilterKey::SsdCondition => &specs.ssd_condition,
            FilterKey::SsdWarranty => &specs.ssd_warranty,
        };
        value.as_deref()
    }
}

/// Whether a product attribute satisfies one selected filter value.
///
/// Both sides are trimmed and compared case-insensitively; either may
/// contain the other. A missing or blank attribute never matches.
pub fn value_matches(product_value: Option<&str>, filter_value: &str) -> bool {
    let product_value = match product_value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_lowercase(),
        _ => return false,
    };
    let filter_value = filter_value.trim().to_lowercase();
    if filter_value.is_empty() {
        return false;
    }

    product_value == filter_value
        || product_value.contains(&filter_value)
        || filter_value.contains(&product_value)
}

/// Inclusive price range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound; unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound; unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Sidebar label (e.g. "Under 30,000").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `min <= price <= max`; a `NaN` price fails any present bound.
    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| min <= price) && self.max.map_or(true, |max| price <= max)
    }

    /// Whether the range constrains anything.
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Active filters for a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct FilterSelection {
    values: BTreeMap<FilterKey, Vec<String>>,
    /// Price bounds.
    pub price_range: Option<PriceRange>,
    /// Only products that are in stock.
    pub in_stock: bool,
    /// Only featured products.
    pub featured: bool,
}

impl FilterSelection {
    /// An empty selection (no constraints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add accepted values for a category. Blank values are dropped.
    pub fn with_values<I, S>(mut self, key: FilterKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_values(key, values);
        self
    }

    /// Add accepted values for a category in place.
    pub fn add_values<I, S>(&mut self, key: FilterKey, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accepted = values
            .into_iter()
            .map(Into::into)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let entry = self.values.entry(key).or_default();
        for value in accepted {
            if !entry.contains(&value) {
                entry.push(value);
            }
        }
        if entry.is_empty() {
            self.values.remove(&key);
        }
    }

    /// Drop a category.
    pub fn clear(&mut self, key: FilterKey) {
        self.values.remove(&key);
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Require products to be in stock.
    pub fn with_in_stock(mut self) -> Self {
        self.in_stock = true;
        self
    }

    /// Require products to be featured.
    pub fn with_featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Accepted values for a category (empty when inactive).
    pub fn values(&self, key: FilterKey) -> &[String] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with at least one accepted value.
    pub fn active_keys(&self) -> impl Iterator<Item = FilterKey> + '_ {
        self.values.keys().copied()
    }

    /// Whether nothing is constrained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && !self.in_stock
            && !self.featured
            && !self.price_range.as_ref().is_some_and(PriceRange::is_bounded)
    }

    /// Whether a product passes every active category.
    pub fn matches(&self, product: &Product) -> bool {
        let lists = self.values.iter().all(|(key, accepted)| {
            let value = key.value_of(product);
            accepted.iter().any(|v| value_matches(value, v))
        });
        if !lists {
            return false;
        }

        if let Some(range) = &self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }

        if self.in_stock && !product.is_in_stock() {
            return false;
        }

        if self.featured && !product.is_featured {
            return false;
        }

        true
    }

    /// Build from a plain filter object; unknown keys are ignored and any
    /// non-object yields an empty selection.
    pub fn from_value(value: &Value) -> Self {
        let mut selection = Self::default();
        let Some(object) = value.as_object() else {
            return selection;
        };

        for (key, value) in object {
            match key.as_str() {
                "priceRange" => selection.price_range = parse_price_range(value),
                "inStock" => selection.in_stock = truthy(value),
                "featured" => selection.featured = truthy(value),
                other => {
                    if let Some(filter_key) = FilterKey::from_key(other) {
                        selection.add_values(filter_key, string_values(value));
                    }
                }
            }
        }

        selection
    }

    /// Parse a JSON filter object.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(CatalogError::InvalidFilter(
                "filter document must be a JSON object".to_string(),
            ));
        }
        Ok(Self::from_value(&value))
    }

    /// Plain filter object with canonical keys.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        for (key, values) in &self.values {
            object.insert(key.as_key().to_string(), Value::from(values.clone()));
        }
        if let Some(range) = &self.price_range {
            if let Ok(range) = serde_json::to_value(range) {
                object.insert("priceRange".to_string(), range);
            }
        }
        if self.in_stock {
            object.insert("inStock".to_string(), Value::Bool(true));
        }
        if self.featured {
            object.insert("featured".to_string(), Value::Bool(true));
        }
        Value::Object(object)
    }
}

impl From<Value> for FilterSelection {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<FilterSelection> for Value {
    fn from(selection: FilterSelection) -> Self {
        selection.to_value()
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn string_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn bound(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_price_range(value: &Value) -> Option<PriceRange> {
    let object = value.as_object()?;
    Some(PriceRange {
        min: bound(object.get("min")),
        max: bound(object.get("max")),
        label: object
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
