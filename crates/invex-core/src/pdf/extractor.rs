//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PDF_MAGIC, Result, TextExtractor, TextLayer, TextToken};
use crate::error::DocumentError;

/// Production text-layer extractor for PDF documents.
///
/// Uses lopdf to validate the container and pdf-extract for the text
/// layer itself. Scanned pages without an embedded text layer simply
/// yield no tokens; OCR is out of scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_tokens(&self, data: &[u8]) -> Result<TextLayer> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(DocumentError::UnsupportedFormat);
        }

        let mut doc =
            Document::load_mem(data).map_err(|e| DocumentError::Malformed(e.to_string()))?;

        // Handle PDFs with empty-password encryption.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| DocumentError::Malformed(e.to_string()))?;
            decrypted
        } else {
            data.to_vec()
        };

        let pages = doc.get_pages().len() as u32;
        if pages == 0 {
            return Err(DocumentError::NoPages);
        }

        let text = pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| DocumentError::TextLayer(e.to_string()))?;

        let tokens = tokenize(&text, pages);
        debug!("extracted {} tokens from {} pages", tokens.len(), pages);

        Ok(TextLayer { tokens, pages })
    }
}

/// Split extracted text into positioned tokens.
///
/// pdf-extract separates pages with form feeds when it can; when the
/// marker is absent, lines are apportioned to pages evenly, the same
/// approximation used for per-page text elsewhere in the ecosystem.
fn tokenize(text: &str, pages: u32) -> Vec<TextToken> {
    let page_texts: Vec<&str> = if text.contains('\u{c}') {
        text.split('\u{c}').collect()
    } else {
        Vec::new()
    };

    if page_texts.len() as u32 == pages && pages > 1 {
        let mut tokens = Vec::new();
        for (page_idx, page_text) in page_texts.iter().enumerate() {
            tokenize_page(page_text, page_idx as u32 + 1, &mut tokens);
        }
        return tokens;
    }

    // Single page or no page markers: apportion lines evenly.
    let lines: Vec<&str> = text.lines().collect();
    let per_page = (lines.len() / pages.max(1) as usize).max(1);

    let mut tokens = Vec::new();
    let mut line_in_page = 0u32;
    let mut current_page = 1u32;

    for (idx, line) in lines.iter().enumerate() {
        let page = ((idx / per_page) as u32 + 1).min(pages);
        if page != current_page {
            current_page = page;
            line_in_page = 0;
        }
        push_line_tokens(line, current_page, line_in_page, &mut tokens);
        line_in_page += 1;
    }

    tokens
}

fn tokenize_page(page_text: &str, page: u32, out: &mut Vec<TextToken>) {
    for (line_idx, line) in page_text.lines().enumerate() {
        push_line_tokens(line, page, line_idx as u32, out);
    }
}

fn push_line_tokens(line: &str, page: u32, line_idx: u32, out: &mut Vec<TextToken>) {
    for (column, word) in line.split_whitespace().enumerate() {
        out.push(TextToken {
            text: word.to_string(),
            page,
            line: line_idx,
            column: column as u32,
        });
    }
}
