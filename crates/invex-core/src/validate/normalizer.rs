//! Type coercion and sanity checks over recognized candidates.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ExtractionResult;
use crate::models::config::ValidationConfig;
use crate::models::invoice::{Invoice, LineItem, SourceRef};
use crate::recognize::{CandidateSet, FieldKind, LineItemCandidate};

/// Date formats accepted during coercion, tried in order. Ambiguous
/// numeric dates resolve month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Fields counted when computing the confidence score.
const TRACKED_FIELDS: &[FieldKind] = &[
    FieldKind::InvoiceNumber,
    FieldKind::VendorName,
    FieldKind::IssueDate,
    FieldKind::Currency,
    FieldKind::TotalAmount,
    FieldKind::LineItems,
];

/// Coerces candidates into a typed invoice, applying the cross-field
/// total check and the confidence formula.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate and normalize a candidate set into an extraction result.
    pub fn validate(&self, candidates: &CandidateSet, source: SourceRef) -> ExtractionResult {
        let mut missing: Vec<FieldKind> = Vec::new();

        // Required: vendor name.
        let vendor = match &candidates.vendor {
            Some(c) if !c.raw.trim().is_empty() => c.raw.trim().to_string(),
            _ => {
                return ExtractionResult::Rejected {
                    reason: "missing required field: vendor name".to_string(),
                };
            }
        };

        // Required: total amount.
        let total = match &candidates.total {
            Some(c) => match parse_amount(&c.raw) {
                Some(total) => total,
                None => {
                    return ExtractionResult::Rejected {
                        reason: format!("unparseable total amount: {:?}", c.raw),
                    };
                }
            },
            None => {
                return ExtractionResult::Rejected {
                    reason: "missing required field: total amount".to_string(),
                };
            }
        };
        if total.is_sign_negative() {
            return ExtractionResult::Rejected {
                reason: format!("negative total amount: {total}"),
            };
        }

        // Identifier: recognized invoice number, otherwise assigned here.
        let id = match &candidates.invoice_number {
            Some(c) if !c.raw.trim().is_empty() => c.raw.trim().to_string(),
            _ => {
                missing.push(FieldKind::InvoiceNumber);
                Uuid::now_v7().to_string()
            }
        };

        // Issue date.
        let issue_date = match &candidates.issue_date {
            Some(c) => match parse_date(&c.raw) {
                Some(date) => Some(date),
                None => {
                    warn!(raw = %c.raw, "unparseable issue date");
                    missing.push(FieldKind::IssueDate);
                    None
                }
            },
            None => {
                missing.push(FieldKind::IssueDate);
                None
            }
        };

        // Currency: recognized code, else inferred from the total's
        // symbol, else the configured default (counted as missing).
        let currency = match &candidates.currency {
            Some(c) => c.raw.trim().to_uppercase(),
            None => {
                let raw_total = candidates.total.as_ref().map(|c| c.raw.as_str()).unwrap_or("");
                match infer_currency(raw_total) {
                    Some(code) => code.to_string(),
                    None => {
                        missing.push(FieldKind::Currency);
                        self.config.default_currency.clone()
                    }
                }
            }
        };

        // Line items.
        let line_items = self.coerce_line_items(&candidates.line_items);
        if line_items.is_empty() {
            missing.push(FieldKind::LineItems);
        }

        // Cross-field check: line totals against the stated total.
        let mut invoice = Invoice {
            id,
            vendor,
            issue_date,
            currency,
            total,
            line_items,
            confidence: 0.0,
            total_mismatch: false,
            source,
        };
        invoice.total_mismatch = !invoice.totals_consistent(self.config.amount_tolerance);

        // Confidence: 1.0 minus the missing-field fraction minus the
        // mismatch penalty, clamped to [0, 1].
        let mut confidence = 1.0 - missing.len() as f32 / TRACKED_FIELDS.len() as f32;
        if invoice.total_mismatch {
            confidence -= self.config.mismatch_penalty;
        }
        invoice.confidence = confidence.clamp(0.0, 1.0);

        debug!(
            id = %invoice.id,
            confidence = invoice.confidence,
            mismatch = invoice.total_mismatch,
            missing = missing.len(),
            "validation complete"
        );

        if missing.is_empty() {
            ExtractionResult::Success(invoice)
        } else {
            ExtractionResult::PartialFailure {
                draft: invoice,
                missing,
            }
        }
    }

    /// Coerce candidate rows, computing whichever of quantity, unit
    /// price, and line total the row omitted. Rows that violate the
    /// quantity/price invariants are dropped.
    fn coerce_line_items(&self, candidates: &[LineItemCandidate]) -> Vec<LineItem> {
        let mut items = Vec::new();

        for row in candidates {
            let quantity = row.quantity_raw.as_deref().and_then(parse_amount);
            let unit_price = row.unit_price_raw.as_deref().and_then(parse_amount);
            let line_total = row.line_total_raw.as_deref().and_then(parse_amount);

            let (quantity, unit_price, line_total) = match (quantity, unit_price, line_total) {
                (Some(q), Some(p), Some(t)) => (q, p, t),
                (Some(q), Some(p), None) => (q, p, q * p),
                (Some(q), None, Some(t)) if !q.is_zero() => (q, t / q, t),
                (None, Some(p), Some(t)) => (if p.is_zero() { Decimal::ONE } else { t / p }, p, t),
                (None, None, Some(t)) => (Decimal::ONE, t, t),
                _ => {
                    warn!(description = %row.description, "dropping uncoercible line item");
                    continue;
                }
            };

            if quantity <= Decimal::ZERO || unit_price.is_sign_negative() {
                warn!(description = %row.description, "dropping invalid line item");
                continue;
            }

            items.push(LineItem {
                description: row.description.clone(),
                quantity,
                unit_price,
                line_total,
            });
        }

        items
    }
}

/// Parse a monetary amount, stripping currency symbols/codes and
/// thousands separators (comma, space, NBSP) and accepting a decimal
/// comma when it is unambiguous.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Both separators: the later one is the decimal point.
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        // Comma only: a trailing 3-digit group reads as thousands.
        (Some(c), None) => {
            if cleaned.len() - c - 1 == 3 {
                cleaned.replace(',', "")
            } else {
                format!("{}.{}", cleaned[..c].replace(',', ""), &cleaned[c + 1..])
            }
        }
        // Dot only: multiple dots read as thousands separators with the
        // last one decimal; a single dot is always decimal.
        (None, Some(d)) => {
            if cleaned.matches('.').count() > 1 {
                let mut out = cleaned[..d].replace('.', "");
                out.push('.');
                out.push_str(&cleaned[d + 1..]);
                out
            } else {
                cleaned
            }
        }
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a calendar date against the fixed accepted-format list.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// Infer a currency code from a symbol in the raw total.
fn infer_currency(raw: &str) -> Option<&'static str> {
    if raw.contains('$') {
        Some("USD")
    } else if raw.contains('€') {
        Some("EUR")
    } else if raw.contains('£') {
        Some("GBP")
    } else {
        None
    }
}
