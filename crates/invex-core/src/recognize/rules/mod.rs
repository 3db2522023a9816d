//! Rule table for invoice field recognition.
//!
//! Rules are pure predicate/transform pairs over reassembled text lines.
//! The table is ordered: earlier rules are tried first within a line, and
//! a candidate only replaces an earlier one when its score is strictly
//! higher, so identical input always yields identical candidates.

pub mod line_items;
pub mod patterns;

use lazy_static::lazy_static;
use regex::Regex;

use super::FieldKind;
use patterns::*;

/// How a rule anchors its value.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Label and value on the same line; the regex captures the value.
    Inline(&'static Regex),
    /// Label alone on a line; the value is captured from the next line.
    LabelThenLine {
        label: &'static Regex,
        value: &'static Regex,
    },
    /// Unlabeled value match, used as a low-score fallback.
    Bare(&'static Regex),
}

/// One recognition rule: field, anchor kind, and label-proximity weight.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: FieldKind,
    pub kind: RuleKind,
    pub weight: f32,
}

lazy_static! {
    /// The ordered rule table. Inline label matches outrank next-line
    /// label matches, which outrank bare fallbacks.
    pub static ref RULES: Vec<FieldRule> = vec![
        FieldRule {
            field: FieldKind::InvoiceNumber,
            kind: RuleKind::Inline(&INVOICE_NUMBER),
            weight: 1.0,
        },
        FieldRule {
            field: FieldKind::InvoiceNumber,
            kind: RuleKind::Inline(&INVOICE_NUMBER_COLON),
            weight: 0.9,
        },
        FieldRule {
            field: FieldKind::VendorName,
            kind: RuleKind::Inline(&VENDOR_INLINE),
            weight: 1.0,
        },
        FieldRule {
            field: FieldKind::VendorName,
            kind: RuleKind::LabelThenLine {
                label: &VENDOR_LABEL,
                value: &NONEMPTY_LINE,
            },
            weight: 0.8,
        },
        FieldRule {
            field: FieldKind::IssueDate,
            kind: RuleKind::Inline(&ISSUE_DATE),
            weight: 1.0,
        },
        FieldRule {
            field: FieldKind::IssueDate,
            kind: RuleKind::Bare(&DATE_SHAPE),
            weight: 0.4,
        },
        FieldRule {
            field: FieldKind::Currency,
            kind: RuleKind::Inline(&CURRENCY_LABELED),
            weight: 1.0,
        },
        FieldRule {
            field: FieldKind::Currency,
            kind: RuleKind::Bare(&CURRENCY_CODE),
            weight: 0.4,
        },
        FieldRule {
            field: FieldKind::TotalAmount,
            kind: RuleKind::Inline(&TOTAL_INLINE),
            weight: 1.0,
        },
        FieldRule {
            field: FieldKind::TotalAmount,
            kind: RuleKind::LabelThenLine {
                label: &TOTAL_LABEL,
                value: &MONEY_LINE,
            },
            weight: 0.8,
        },
    ];
}
