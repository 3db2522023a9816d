//! PDF text-layer extraction.

mod extractor;

pub use extractor::PdfTextExtractor;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// PDF file signature. Inputs not starting with this are rejected
/// before any parsing is attempted.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Result type for text-layer operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// A unit of extracted text with page/position metadata.
///
/// Positions are approximate: `line` is the reading-order line index
/// within the page and `column` the token index within the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    /// Token text, whitespace-trimmed, never empty.
    pub text: String,
    /// Page number, 1-indexed, ascending.
    pub page: u32,
    /// Line index within the page, 0-indexed.
    pub line: u32,
    /// Token index within the line, 0-indexed.
    pub column: u32,
}

/// Text layer pulled out of a document.
#[derive(Debug, Clone, Default)]
pub struct TextLayer {
    /// Tokens in natural reading order, pages ascending.
    pub tokens: Vec<TextToken>,
    /// Number of pages in the document.
    pub pages: u32,
}

/// Trait for text-layer extraction implementations.
///
/// Pure transformation: implementations read only the input bytes and
/// have no side effects.
pub trait TextExtractor {
    /// Extract positioned text tokens from a document byte stream.
    fn extract_tokens(&self, data: &[u8]) -> Result<TextLayer>;
}
