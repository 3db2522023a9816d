//! Rule-driven field recognizer.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::rules::line_items::extract_line_items;
use super::rules::patterns::MONEY;
use super::rules::{RULES, RuleKind};
use super::{CandidateSet, FieldCandidate, LineView, build_lines};
use crate::models::config::RecognizerConfig;
use crate::pdf::TextToken;

/// Score assigned to fallback candidates (letterhead vendor, largest
/// amount as total) that have no label anchoring them.
const FALLBACK_SCORE: f32 = 0.3;

/// Applies the rule table over a token sequence and keeps the best
/// candidate per field. Pure and deterministic: identical tokens always
/// yield an identical `CandidateSet`.
#[derive(Debug, Clone, Default)]
pub struct FieldRecognizer {
    config: RecognizerConfig,
}

impl FieldRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecognizerConfig) -> Self {
        Self { config }
    }

    /// Recognize invoice fields and line items from the token sequence.
    pub fn recognize(&self, tokens: &[TextToken]) -> CandidateSet {
        let lines = build_lines(tokens);
        let mut set = CandidateSet::default();

        // Lines outer, rules inner: a later candidate replaces an earlier
        // one only with a strictly higher score, so the earliest
        // page/line/column wins ties.
        for (idx, line) in lines.iter().enumerate() {
            for rule in RULES.iter() {
                let candidate = match rule.kind {
                    RuleKind::Inline(pattern) => pattern.captures(&line.text).map(|caps| {
                        let value = caps.get(1).unwrap_or_else(|| caps.get(0).unwrap());
                        FieldCandidate {
                            raw: value.as_str().trim().to_string(),
                            span: line.span_for(value.start(), value.end()),
                            score: rule.weight,
                        }
                    }),
                    RuleKind::LabelThenLine { label, value } => {
                        if label.is_match(&line.text) {
                            lines.get(idx + 1).and_then(|next| {
                                value.captures(&next.text).map(|caps| {
                                    let m = caps.get(1).unwrap_or_else(|| caps.get(0).unwrap());
                                    FieldCandidate {
                                        raw: m.as_str().trim().to_string(),
                                        span: next.span_for(m.start(), m.end()),
                                        score: rule.weight,
                                    }
                                })
                            })
                        } else {
                            None
                        }
                    }
                    RuleKind::Bare(pattern) => pattern.find(&line.text).map(|m| FieldCandidate {
                        raw: m.as_str().trim().to_string(),
                        span: line.span_for(m.start(), m.end()),
                        score: rule.weight,
                    }),
                };

                let Some(candidate) = candidate else { continue };
                if candidate.score < self.config.min_candidate_score {
                    continue;
                }

                if let Some(slot) = set.slot_mut(rule.field) {
                    let better = slot
                        .as_ref()
                        .map(|current| candidate.score > current.score)
                        .unwrap_or(true);
                    if better {
                        *slot = Some(candidate);
                    }
                }
            }
        }

        set.line_items = extract_line_items(&lines);

        if set.vendor.is_none() && self.config.letterhead_vendor_fallback {
            set.vendor = letterhead_vendor(&lines);
        }
        if set.total.is_none() {
            set.total = largest_amount(&lines);
        }

        debug!(
            vendor = set.vendor.is_some(),
            total = set.total.is_some(),
            line_items = set.line_items.len(),
            "field recognition complete"
        );

        set
    }
}

/// Letterhead heuristic: the first text line of page one is usually the
/// vendor name when no labeled candidate exists.
fn letterhead_vendor(lines: &[LineView]) -> Option<FieldCandidate> {
    lines
        .iter()
        .find(|l| l.page == 1 && !l.text.trim().is_empty())
        .map(|line| FieldCandidate {
            raw: line.text.trim().to_string(),
            span: line.full_span(),
            score: FALLBACK_SCORE,
        })
}

/// Unlabeled total fallback: the largest amount in the document, ties
/// broken by earliest occurrence.
fn largest_amount(lines: &[LineView]) -> Option<FieldCandidate> {
    let mut best: Option<(Decimal, FieldCandidate)> = None;

    for line in lines {
        for m in MONEY.find_iter(&line.text) {
            let digits: String = m
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
                .collect();
            let normalized = digits.replace(',', "");
            let Ok(value) = Decimal::from_str(&normalized) else {
                continue;
            };
            let replace = best.as_ref().map(|(v, _)| value > *v).unwrap_or(true);
            if replace {
                best = Some((
                    value,
                    FieldCandidate {
                        raw: m.as_str().trim().to_string(),
                        span: line.span_for(m.start(), m.end()),
                        score: FALLBACK_SCORE,
                    },
                ));
            }
        }
    }

    best.map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens_from(text: &str) -> Vec<TextToken> {
        let mut tokens = Vec::new();
        for (line_idx, line) in text.lines().enumerate() {
            for (col, word) in line.split_whitespace().enumerate() {
                tokens.push(TextToken {
                    text: word.to_string(),
                    page: 1,
                    line: line_idx as u32,
                    column: col as u32,
                });
            }
        }
        tokens
    }

    #[test]
    fn test_recognize_basic_invoice() {
        let tokens = tokens_from(
            "Acme Corp\n\
             Invoice # INV-2024-001\n\
             Invoice Date: 2024-01-15\n\
             Widget x10 @ $123.456\n\
             Total: $1,234.56",
        );
        let set = FieldRecognizer::new().recognize(&tokens);

        assert_eq!(set.invoice_number.as_ref().unwrap().raw, "INV-2024-001");
        assert_eq!(set.issue_date.as_ref().unwrap().raw, "2024-01-15");
        assert_eq!(set.total.as_ref().unwrap().raw, "$1,234.56");
        assert_eq!(set.line_items.len(), 1);
        // No vendor label: the letterhead line is used at fallback score.
        let vendor = set.vendor.as_ref().unwrap();
        assert_eq!(vendor.raw, "Acme Corp");
        assert_eq!(vendor.score, FALLBACK_SCORE);
    }

    #[test]
    fn test_labeled_vendor_beats_letterhead() {
        let tokens = tokens_from("Some Heading\nVendor: Acme Corp");
        let set = FieldRecognizer::new().recognize(&tokens);
        assert_eq!(set.vendor.as_ref().unwrap().raw, "Acme Corp");
    }

    #[test]
    fn test_vendor_label_on_preceding_line() {
        let tokens = tokens_from("Sold by:\nAcme Corp\nTotal: $5.00");
        let set = FieldRecognizer::new().recognize(&tokens);
        let vendor = set.vendor.unwrap();
        assert_eq!(vendor.raw, "Acme Corp");
        assert_eq!(vendor.score, 0.8);
    }

    #[test]
    fn test_earliest_candidate_wins_ties() {
        let tokens = tokens_from("Invoice # FIRST-1\nInvoice # SECOND-2");
        let set = FieldRecognizer::new().recognize(&tokens);
        assert_eq!(set.invoice_number.unwrap().raw, "FIRST-1");
    }

    #[test]
    fn test_total_fallback_picks_largest_amount() {
        let tokens = tokens_from("Acme Corp\nline one 10.00\nline two 900.00\nline three 45.50");
        let set = FieldRecognizer::new().recognize(&tokens);
        let total = set.total.unwrap();
        assert_eq!(total.raw, "900.00");
        assert_eq!(total.score, FALLBACK_SCORE);
    }

    #[test]
    fn test_missing_fields_yield_empty_candidates() {
        let set = FieldRecognizer::new().recognize(&[]);
        assert_eq!(set, CandidateSet::default());
    }

    #[test]
    fn test_deterministic() {
        let tokens = tokens_from("Acme Corp\nInvoice # 7\nTotal: $9.99");
        let recognizer = FieldRecognizer::new();
        assert_eq!(recognizer.recognize(&tokens), recognizer.recognize(&tokens));
    }

    #[test]
    fn test_span_annotation() {
        let tokens = tokens_from("Invoice # INV-1");
        let set = FieldRecognizer::new().recognize(&tokens);
        let span = set.invoice_number.unwrap().span;
        assert_eq!(span.page, 1);
        assert_eq!(span.line, 0);
        assert_eq!(span.start, 2);
        assert_eq!(span.end, 2);
    }
}
