//! Field recognition over extracted text tokens.

mod recognizer;
pub mod rules;

pub use recognizer::FieldRecognizer;

use serde::{Deserialize, Serialize};

use crate::pdf::TextToken;

/// Invoice-level fields the recognizer looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    InvoiceNumber,
    VendorName,
    IssueDate,
    Currency,
    TotalAmount,
    LineItems,
}

impl FieldKind {
    /// Human-readable field name used in rejection reasons and reports.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::InvoiceNumber => "invoice number",
            FieldKind::VendorName => "vendor name",
            FieldKind::IssueDate => "issue date",
            FieldKind::Currency => "currency",
            FieldKind::TotalAmount => "total amount",
            FieldKind::LineItems => "line items",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Token range a candidate was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpan {
    /// Page number, 1-indexed.
    pub page: u32,
    /// Line index within the page.
    pub line: u32,
    /// First token column covered by the match.
    pub start: u32,
    /// Last token column covered by the match, inclusive.
    pub end: u32,
}

/// A raw candidate value for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    /// Raw string value as it appeared in the document.
    pub raw: String,
    /// Token span the value was derived from.
    pub span: TokenSpan,
    /// Label-proximity score. Higher wins; ties broken by earliest
    /// page/line/column.
    pub score: f32,
}

/// A raw candidate row from the line-item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemCandidate {
    /// Description text for the row.
    pub description: String,
    /// Raw quantity, when the row carried one.
    pub quantity_raw: Option<String>,
    /// Raw unit price, when the row carried one.
    pub unit_price_raw: Option<String>,
    /// Raw line total, when the row carried one.
    pub line_total_raw: Option<String>,
    /// Token span of the row.
    pub span: TokenSpan,
}

/// The recognizer's output: best candidate per field plus the candidate
/// line-item table. Empty slots mean "no match", never an error; the
/// validator decides materiality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub invoice_number: Option<FieldCandidate>,
    pub vendor: Option<FieldCandidate>,
    pub issue_date: Option<FieldCandidate>,
    pub currency: Option<FieldCandidate>,
    pub total: Option<FieldCandidate>,
    pub line_items: Vec<LineItemCandidate>,
}

impl CandidateSet {
    /// Mutable slot for a scalar field. `LineItems` has no scalar slot.
    pub(crate) fn slot_mut(&mut self, field: FieldKind) -> Option<&mut Option<FieldCandidate>> {
        Some(match field {
            FieldKind::InvoiceNumber => &mut self.invoice_number,
            FieldKind::VendorName => &mut self.vendor,
            FieldKind::IssueDate => &mut self.issue_date,
            FieldKind::Currency => &mut self.currency,
            FieldKind::TotalAmount => &mut self.total,
            FieldKind::LineItems => return None,
        })
    }
}

/// One reading-order line reassembled from tokens, with the character
/// offset of each token so regex matches can be mapped back to spans.
#[derive(Debug, Clone)]
pub(crate) struct LineView {
    pub page: u32,
    pub line: u32,
    pub text: String,
    /// Character range of each token within `text`.
    pub offsets: Vec<(usize, usize)>,
}

impl LineView {
    /// Map a character range of `text` back to a token span.
    pub fn span_for(&self, start: usize, end: usize) -> TokenSpan {
        let mut first = None;
        let mut last = 0u32;
        for (col, &(tok_start, tok_end)) in self.offsets.iter().enumerate() {
            if tok_end > start && first.is_none() {
                first = Some(col as u32);
            }
            if tok_start < end {
                last = col as u32;
            }
        }
        let first = first.unwrap_or(0);
        TokenSpan {
            page: self.page,
            line: self.line,
            start: first,
            end: last.max(first),
        }
    }

    /// Span covering the whole line.
    pub fn full_span(&self) -> TokenSpan {
        TokenSpan {
            page: self.page,
            line: self.line,
            start: 0,
            end: self.offsets.len().saturating_sub(1) as u32,
        }
    }
}

/// Group consecutive tokens into per-line views.
pub(crate) fn build_lines(tokens: &[TextToken]) -> Vec<LineView> {
    let mut lines: Vec<LineView> = Vec::new();

    for token in tokens {
        let same_line = lines
            .last()
            .map(|l| l.page == token.page && l.line == token.line)
            .unwrap_or(false);

        if !same_line {
            lines.push(LineView {
                page: token.page,
                line: token.line,
                text: String::new(),
                offsets: Vec::new(),
            });
        }

        let view = lines.last_mut().unwrap();
        if !view.text.is_empty() {
            view.text.push(' ');
        }
        let start = view.text.len();
        view.text.push_str(&token.text);
        view.offsets.push((start, view.text.len()));
    }

    lines
}
