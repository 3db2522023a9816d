//! Line-item table recognition.

use super::patterns::{COMPACT_ITEM, ITEM_TABLE_END, ITEM_TABLE_HEADER, ROW_NUMBER};
use crate::recognize::{LineItemCandidate, LineView};

/// Extract candidate line items from reassembled lines.
///
/// Two row forms are recognized: tabular rows following a header line
/// ("Description ... Qty ... Price ... Total"), and the compact form
/// "Widget x10 @ $123.456" anywhere in the document. Tabular rows take
/// precedence when both are present.
pub fn extract_line_items(lines: &[LineView]) -> Vec<LineItemCandidate> {
    let table_items = extract_table_rows(lines);
    if !table_items.is_empty() {
        return table_items;
    }
    extract_compact_rows(lines)
}

fn extract_table_rows(lines: &[LineView]) -> Vec<LineItemCandidate> {
    let mut items = Vec::new();
    let mut in_table = false;

    for line in lines {
        if !in_table {
            if ITEM_TABLE_HEADER.is_match(&line.text) {
                in_table = true;
            }
            continue;
        }

        if ITEM_TABLE_END.is_match(&line.text) {
            break;
        }

        if line.text.trim().is_empty() {
            continue;
        }

        if let Some(item) = parse_table_row(line) {
            items.push(item);
        }
    }

    items
}

fn extract_compact_rows(lines: &[LineView]) -> Vec<LineItemCandidate> {
    let mut items = Vec::new();

    for line in lines {
        if let Some(caps) = COMPACT_ITEM.captures(&line.text) {
            items.push(LineItemCandidate {
                description: caps["desc"].trim().to_string(),
                quantity_raw: Some(caps["qty"].to_string()),
                unit_price_raw: Some(caps["price"].trim().to_string()),
                line_total_raw: caps.name("total").map(|m| m.as_str().trim().to_string()),
                span: line.full_span(),
            });
        }
    }

    items
}

/// Parse one tabular row. Numbers are read right to left: the last is
/// the line total, the one before it the unit price; the first number
/// is the quantity when three or more are present.
fn parse_table_row(line: &LineView) -> Option<LineItemCandidate> {
    // The compact form can appear inside a table body too.
    if let Some(caps) = COMPACT_ITEM.captures(&line.text) {
        return Some(LineItemCandidate {
            description: caps["desc"].trim().to_string(),
            quantity_raw: Some(caps["qty"].to_string()),
            unit_price_raw: Some(caps["price"].trim().to_string()),
            line_total_raw: caps.name("total").map(|m| m.as_str().trim().to_string()),
            span: line.full_span(),
        });
    }

    let numbers: Vec<regex::Match<'_>> = ROW_NUMBER.find_iter(&line.text).collect();
    if numbers.is_empty() {
        return None;
    }

    let description = line.text[..numbers[0].start()]
        .trim_matches(|c: char| c.is_whitespace() || c == '|' || c == '-' || c == ':')
        .to_string();
    if description.is_empty() {
        return None;
    }

    let raw = |m: &regex::Match<'_>| m.as_str().trim().to_string();

    let (quantity_raw, unit_price_raw, line_total_raw) = match numbers.len() {
        1 => (None, None, Some(raw(&numbers[0]))),
        2 => (Some(raw(&numbers[0])), Some(raw(&numbers[1])), None),
        n => (
            Some(raw(&numbers[0])),
            Some(raw(&numbers[n - 2])),
            Some(raw(&numbers[n - 1])),
        ),
    };

    Some(LineItemCandidate {
        description,
        quantity_raw,
        unit_price_raw,
        line_total_raw,
        span: line.full_span(),
    })
}
