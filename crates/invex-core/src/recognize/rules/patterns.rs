//! Regex patterns for invoice field recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: labeled forms ("Invoice #", "Invoice No", "Invoice Number").
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\binvoice\s*(?:#|no\.?|num(?:ber)?\.?)\s*[:.]?\s*([A-Za-z0-9][A-Za-z0-9/_\-]*)"
    ).unwrap();

    // Weaker labeled form: "Invoice: INV-001".
    pub static ref INVOICE_NUMBER_COLON: Regex = Regex::new(
        r"(?i)\binvoice\s*:\s*([A-Za-z0-9][A-Za-z0-9/_\-]*)"
    ).unwrap();

    // Vendor name: label and value on the same line.
    pub static ref VENDOR_INLINE: Regex = Regex::new(
        r"(?i)\b(?:vendor|seller|supplier|sold\s+by|remit\s+to|bill\s+from|issued\s+by)\s*:\s*(.+)"
    ).unwrap();

    // Vendor name: label alone on a line, value on the next line.
    pub static ref VENDOR_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:vendor|seller|supplier|sold\s+by|remit\s+to|bill\s+from|issued\s+by)\s*:?\s*$"
    ).unwrap();

    // Any non-empty line, used as the value pattern for label-then-line rules.
    pub static ref NONEMPTY_LINE: Regex = Regex::new(r"^\s*(\S.*?)\s*$").unwrap();

    // A date in one of the accepted shapes.
    pub static ref DATE_SHAPE: Regex = Regex::new(concat!(
        r"(\d{4}-\d{2}-\d{2}",
        r"|\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}",
        r"|(?:January|February|March|April|May|June|July|August|September|October|November|December",
        r"|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}",
        r"|\d{1,2}\s+(?:January|February|March|April|May|June|July|August|September|October|November|December",
        r"|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4})"
    )).unwrap();

    // Issue date: labeled forms.
    pub static ref ISSUE_DATE: Regex = Regex::new(concat!(
        r"(?i)\b(?:invoice\s+date|issue\s+date|date\s+of\s+issue|issued\s+on|dated?)\s*[:.]?\s*",
        r"(\d{4}-\d{2}-\d{2}",
        r"|\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}",
        r"|[A-Za-z]{3,9}\.?\s+\d{1,2},?\s+\d{4}",
        r"|\d{1,2}\s+[A-Za-z]{3,9}\.?\s+\d{4})"
    )).unwrap();

    // Currency: labeled form ("Currency: USD").
    pub static ref CURRENCY_LABELED: Regex = Regex::new(
        r"(?i)\bcurrency\s*[:.]?\s*([A-Za-z]{3})\b"
    ).unwrap();

    // Currency: bare ISO code.
    pub static ref CURRENCY_CODE: Regex = Regex::new(
        r"\b(USD|EUR|GBP|PLN|CHF|SEK|NOK|DKK|JPY|CAD|AUD)\b"
    ).unwrap();

    // A currency amount: optional symbol/code, thousands separators, decimals.
    pub static ref MONEY: Regex = Regex::new(
        r"(?:[A-Z]{3}\s*)?[$€£]?\s*\d{1,3}(?:[,\s\u{00a0}]\d{3})*(?:[.,]\d{1,4})?"
    ).unwrap();

    // Total amount near a "Total" label. \b keeps "Subtotal" from matching.
    pub static ref TOTAL_INLINE: Regex = Regex::new(
        r"(?i)\b(?:grand\s+total|total\s+due|total\s+amount|amount\s+due|balance\s+due|total)\s*[:.]?\s*((?:[A-Za-z]{3}\s*)?[$€£]?\s*\d{1,3}(?:[,\s\u{00a0}]\d{3})*(?:[.,]\d{1,4})?)"
    ).unwrap();

    // Total label alone on a line; the amount sits on the next line.
    pub static ref TOTAL_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:grand\s+total|total\s+due|total\s+amount|amount\s+due|balance\s+due|total)\s*[:.]?\s*$"
    ).unwrap();

    // An amount standing alone on a line.
    pub static ref MONEY_LINE: Regex = Regex::new(
        r"^\s*((?:[A-Za-z]{3}\s*)?[$€£]?\s*\d{1,3}(?:[,\s\u{00a0}]\d{3})*(?:[.,]\d{1,4})?)\s*$"
    ).unwrap();

    // Line-item table header row.
    pub static ref ITEM_TABLE_HEADER: Regex = Regex::new(
        r"(?i)\b(?:description|item|product|service)s?\b.*\b(?:qty|quantity|amount|price|total)\b"
    ).unwrap();

    // Summary row that terminates the line-item table.
    pub static ref ITEM_TABLE_END: Regex = Regex::new(
        r"(?i)^\s*(?:sub\s*total|subtotal|grand\s+total|total\s+due|total\s+amount|amount\s+due|balance\s+due|total|tax|vat|shipping)\b"
    ).unwrap();

    // Compact single-line item: "Widget x10 @ $123.456".
    pub static ref COMPACT_ITEM: Regex = Regex::new(
        r"(?i)^(?P<desc>.+?)\s+[x×]\s*(?P<qty>\d+(?:\.\d+)?)\s*@\s*(?P<price>[$€£]?\s*\d{1,3}(?:[,\s]\d{3})*(?:\.\d{1,4})?)(?:\s*=?\s*(?P<total>[$€£]?\s*\d{1,3}(?:[,\s]\d{3})*(?:\.\d{1,4})?))?\s*$"
    ).unwrap();

    // Any number inside a table row.
    pub static ref ROW_NUMBER: Regex = Regex::new(
        r"[$€£]?\s*\d{1,3}(?:,\d{3})*(?:\.\d{1,4})?"
    ).unwrap();
}
