//! Strict-mode audit of raw product rows.
//!
//! The listing pipeline tolerates inconsistent rows. This module reports
//! them instead, so bad data can be fixed at the source. Auditing never
//! changes what the pipeline does with a row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::raw::{FlexBool, FlexNumber, FlexText, RawProduct};

/// Kind of problem found in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The payload is not a JSON array.
    NotAnArray,
    /// The element is not a readable product object.
    UnreadableRow,
    /// No usable id.
    MissingId,
    /// Numeric field holding text that is not a number.
    MalformedNumber,
    /// Boolean field holding text other than `true` / `false`.
    UnrecognisedFlag,
    /// Field holding a JSON type it never takes (e.g. a number in a flag).
    /// The field is read as absent.
    UnexpectedType,
    /// Price below zero.
    NegativePrice,
    /// Discount percentage outside 0..=100.
    DiscountOutOfRange,
    /// Marked discounted but the original price is not above the price.
    DiscountWithoutMarkdown,
    /// `created_at` could not be parsed.
    InvalidTimestamp,
}

/// One problem in one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// Position in the payload.
    pub index: usize,
    /// Row id, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Offending field.
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.product_id {
            Some(id) => write!(f, "#{} ({}) {}: {}", self.index, id, self.field, self.message),
            None => write!(f, "#{} {}: {}", self.index, self.field, self.message),
        }
    }
}

/// Result of auditing a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Number of elements examined.
    pub records: usize,
    pub issues: Vec<RecordIssue>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct rows with at least one issue.
    pub fn flagged_records(&self) -> usize {
        let mut indexes: Vec<usize> = self.issues.iter().map(|i| i.index).collect();
        indexes.dedup();
        indexes.len()
    }
}

struct Collector<'a> {
    index: usize,
    product_id: Option<String>,
    issues: &'a mut Vec<RecordIssue>,
}

impl Collector<'_> {
    fn push(&mut self, field: &str, kind: IssueKind, message: String) {
        self.issues.push(RecordIssue {
            index: self.index,
            product_id: self.product_id.clone(),
            field: field.to_string(),
            kind,
            message,
        });
    }

    fn unexpected(&mut self, field: &str, value: &serde_json::Value) {
        self.push(
            field,
            IssueKind::UnexpectedType,
            format!("unexpected value {}, read as absent", value),
        );
    }

    fn number(&mut self, field: &str, value: &Option<FlexNumber>) {
        match value {
            Some(FlexNumber::Text(text)) if value.as_ref().is_some_and(FlexNumber::is_malformed) => {
                self.push(field, IssueKind::MalformedNumber, format!("{:?} is not a number", text));
            }
            Some(FlexNumber::Other(other)) => self.unexpected(field, other),
            _ => {}
        }
    }

    fn flag(&mut self, field: &str, value: &Option<FlexBool>) {
        match value {
            Some(FlexBool::Text(text)) if value.as_ref().is_some_and(FlexBool::is_unrecognised) => {
                self.push(
                    field,
                    IssueKind::UnrecognisedFlag,
                    format!("{:?} is neither true nor false", text),
                );
            }
            Some(FlexBool::Other(other)) => self.unexpected(field, other),
            _ => {}
        }
    }

    fn text(&mut self, field: &str, value: &Option<FlexText>) {
        if let Some(FlexText::Other(other)) = value {
            self.unexpected(field, other);
        }
    }
}

/// Audit one row.
pub fn audit_record(index: usize, raw: &RawProduct) -> Vec<RecordIssue> {
    let mut issues = Vec::new();
    let product = raw.clone().into_product();
    let mut c = Collector {
        index,
        product_id: product.as_ref().map(|p| p.id.to_string()),
        issues: &mut issues,
    };

    if product.is_none() {
        c.push("id", IssueKind::MissingId, "row has no usable id".to_string());
    }

    c.number("price", &raw.price);
    c.number("original_price", &raw.original_price);
    c.number("discount_percentage", &raw.discount_percentage);
    c.number("stock_quantity", &raw.stock_quantity);

    c.flag("in_stock", &raw.in_stock);
    c.flag("is_active", &raw.is_active);
    c.flag("is_discounted", &raw.is_discounted);
    c.flag("is_clearance", &raw.is_clearance);
    c.flag("is_featured", &raw.is_featured);
    c.flag("featured", &raw.featured);
    c.flag("is_workstation", &raw.is_workstation);
    c.flag("seo_only", &raw.seo_only);

    for (field, value) in [
        ("name", &raw.name),
        ("brand", &raw.brand),
        ("category", &raw.category),
        ("category_id", &raw.category_id),
        ("description", &raw.description),
        ("processor", &raw.processor),
        ("ram", &raw.ram),
        ("hdd", &raw.hdd),
        ("storage", &raw.storage),
        ("display_size", &raw.display_size),
        ("display", &raw.display),
    ] {
        c.text(field, value);
    }

    if let Some(created) = &raw.created_at {
        let blank = matches!(created, FlexText::Text(t) if t.trim().is_empty());
        if !blank && created.timestamp().is_none() {
            let shown = match created {
                FlexText::Text(t) => format!("{:?}", t),
                FlexText::Number(n) => n.to_string(),
                FlexText::Bool(b) => b.to_string(),
                FlexText::Other(v) => v.to_string(),
            };
            c.push(
                "created_at",
                IssueKind::InvalidTimestamp,
                format!("{} is not a timestamp", shown),
            );
        }
    }

    if let Some(product) = &product {
        if product.price < 0.0 {
            c.push("price", IssueKind::NegativePrice, format!("price is {}", product.price));
        }
        if let Some(pct) = product.discount_percentage.filter(|p| !p.is_nan()) {
            if !(0.0..=100.0).contains(&pct) {
                c.push(
                    "discount_percentage",
                    IssueKind::DiscountOutOfRange,
                    format!("{} is outside 0-100", pct),
                );
            }
        }
        if product.is_discounted {
            if let Some(original) = product.original_price {
                if original <= product.price {
                    c.push(
                        "original_price",
                        IssueKind::DiscountWithoutMarkdown,
                        format!(
                            "discounted but original price {} is not above price {}",
                            original, product.price
                        ),
                    );
                }
            }
        }
    }

    issues
}

/// Audit a whole payload.
pub fn audit_catalog(payload: &serde_json::Value) -> AuditReport {
    let Some(items) = payload.as_array() else {
        return AuditReport {
            records: 0,
            issues: vec![RecordIssue {
                index: 0,
                product_id: None,
                field: "$".to_string(),
                kind: IssueKind::NotAnArray,
                message: "payload is not a JSON array".to_string(),
            }],
        };
    };

    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match RawProduct::deserialize(item) {
            Ok(raw) => issues.extend(audit_record(index, &raw)),
            Err(e) => issues.push(RecordIssue {
                index,
                product_id: None,
                field: "$".to_string(),
                kind: IssueKind::UnreadableRow,
                message: e.to_string(),
            }),
        }
    }

    AuditReport {
        records: items.len(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kinds(report: &AuditReport) -> Vec<IssueKind> {
        report.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_clean_row() {
        let report = audit_catalog(&json!([{
            "id": 1,
            "price": 30000,
            "original_price": "35000",
            "is_discounted": true,
            "in_stock": "true",
            "created_at": "2024-01-01T00:00:00Z"
        }]));
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.records, 1);
    }

    #[test]
    fn test_malformed_values() {
        let report = audit_catalog(&json!([{
            "id": "x",
            "price": "call us",
            "stock_quantity": "few",
            "in_stock": "yes",
            "created_at": "soon"
        }]));
        assert_eq!(
            kinds(&report),
            vec![
                IssueKind::MalformedNumber,
                IssueKind::MalformedNumber,
                IssueKind::UnrecognisedFlag,
                IssueKind::InvalidTimestamp,
            ]
        );
        assert_eq!(report.issues[0].product_id.as_deref(), Some("x"));
        assert_eq!(report.flagged_records(), 1);
    }

    #[test]
    fn test_unexpected_types_reported_not_dropped() {
        let payload = json!([
            {"id": 1, "in_stock": 1},
            {"id": 2, "created_at": 1714521600},
            {"id": 3, "discount_percentage": true, "brand": {"name": "HP"}}
        ]);
        let report = audit_catalog(&payload);
        assert_eq!(
            kinds(&report),
            vec![
                IssueKind::UnexpectedType,
                IssueKind::InvalidTimestamp,
                IssueKind::UnexpectedType,
                IssueKind::UnexpectedType,
            ]
        );
        assert_eq!(report.issues[0].field, "in_stock");
        assert_eq!(report.issues[1].message, "1714521600 is not a timestamp");
        assert_eq!(report.issues[3].field, "brand");
        assert_eq!(report.flagged_records(), 3);

        let ids: Vec<String> = crate::catalog::load_products(&payload)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_contradictory_discount() {
        let report = audit_catalog(&json!([{
            "id": 2,
            "price": 120,
            "original_price": 100,
            "is_discounted": true,
            "discount_percentage": 150
        }]));
        assert_eq!(
            kinds(&report),
            vec![IssueKind::DiscountOutOfRange, IssueKind::DiscountWithoutMarkdown]
        );
    }

    #[test]
    fn test_structural_problems() {
        let report = audit_catalog(&json!([{"name": "no id"}, 42, {"id": 3, "price": -5}]));
        assert_eq!(
            kinds(&report),
            vec![IssueKind::MissingId, IssueKind::UnreadableRow, IssueKind::NegativePrice]
        );
        assert_eq!(report.flagged_records(), 3);

        let report = audit_catalog(&json!({"products": []}));
        assert_eq!(kinds(&report), vec![IssueKind::NotAnArray]);
    }

    #[test]
    fn test_issue_display() {
        let issue = RecordIssue {
            index: 4,
            product_id: Some("p-9".into()),
            field: "price".into(),
            kind: IssueKind::NegativePrice,
            message: "price is -1".into(),
        };
        assert_eq!(issue.to_string(), "#4 (p-9) price: price is -1");
    }
}
