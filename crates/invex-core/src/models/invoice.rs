//! Invoice data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A structured invoice record produced by a successful extraction.
///
/// Treated as immutable once stored; re-extraction of the same document
/// creates a new record rather than patching an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier. The recognized invoice number when one was
    /// found, otherwise assigned at extraction time.
    pub id: String,

    /// Vendor (seller) name.
    pub vendor: String,

    /// Date the invoice was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,

    /// Currency code (e.g. "USD", "EUR").
    pub currency: String,

    /// Total amount due. Non-negative.
    pub total: Decimal,

    /// Line items in document order. Owned by this invoice.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Set when the line-item totals disagree with the stated total
    /// beyond tolerance. The record carries the flag instead of failing.
    #[serde(default)]
    pub total_mismatch: bool,

    /// Reference to the source document.
    #[serde(default)]
    pub source: SourceRef,
}

/// A single billed row within an invoice. No independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Quantity. Positive.
    pub quantity: Decimal,

    /// Unit price. Non-negative.
    pub unit_price: Decimal,

    /// Total for this line (= quantity x unit price within tolerance).
    pub line_total: Decimal,
}

impl LineItem {
    /// Amount this line should carry given its quantity and unit price.
    pub fn computed_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Reference to the document an invoice was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Filename hint supplied with the submission, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Number of pages in the source document.
    pub pages: u32,
}

impl Invoice {
    /// Sum of the line-item totals.
    pub fn line_item_sum(&self) -> Decimal {
        self.line_items.iter().map(|item| item.line_total).sum()
    }

    /// Check the stated total against the line items within `tolerance`.
    /// Invoices without line items are trivially consistent.
    pub fn totals_consistent(&self, tolerance: Decimal) -> bool {
        if self.line_items.is_empty() {
            return true;
        }
        (self.line_item_sum() - self.total).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_invoice() -> Invoice {
        Invoice {
            id: "INV-001".to_string(),
            vendor: "Acme Corp".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            currency: "USD".to_string(),
            total: dec("1234.56"),
            line_items: vec![LineItem {
                description: "Widget".to_string(),
                quantity: dec("10"),
                unit_price: dec("123.456"),
                line_total: dec("1234.56"),
            }],
            confidence: 0.95,
            total_mismatch: false,
            source: SourceRef::default(),
        }
    }

    #[test]
    fn test_line_item_sum() {
        let invoice = sample_invoice();
        assert_eq!(invoice.line_item_sum(), dec("1234.56"));
    }

    #[test]
    fn test_totals_consistent_within_tolerance() {
        let invoice = sample_invoice();
        assert!(invoice.totals_consistent(dec("0.01")));
    }

    #[test]
    fn test_totals_inconsistent_beyond_tolerance() {
        let mut invoice = sample_invoice();
        invoice.total = dec("1300.00");
        assert!(!invoice.totals_consistent(dec("0.01")));
    }

    #[test]
    fn test_empty_line_items_are_consistent() {
        let mut invoice = sample_invoice();
        invoice.line_items.clear();
        assert!(invoice.totals_consistent(dec("0.01")));
    }

    #[test]
    fn test_computed_line_total() {
        let item = LineItem {
            description: "Widget".to_string(),
            quantity: dec("10"),
            unit_price: dec("123.456"),
            line_total: dec("1234.56"),
        };
        assert_eq!(item.computed_total(), dec("1234.560"));
    }

    #[test]
    fn test_invoice_serde_round_trip() {
        let invoice = sample_invoice();
        let json = serde_json::to_string(&invoice).unwrap();
        let back: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(invoice, back);
    }
}
