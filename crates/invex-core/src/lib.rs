//! Core library for PDF invoice extraction.
//!
//! This crate provides:
//! - PDF text-layer extraction (positioned tokens, format gating)
//! - Rule-based invoice field recognition (labels, amounts, dates, line items)
//! - Validation/normalization into confidence-scored invoice records
//! - The record store contract and an in-memory implementation
//! - The pipeline orchestrator tying the stages together

pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod recognize;
pub mod store;
pub mod validate;

pub use error::{DocumentError, InvexError, PipelineError, Result, StoreError};
pub use models::config::PipelineConfig;
pub use models::invoice::{Invoice, LineItem, SourceRef};
pub use pdf::{PdfTextExtractor, TextExtractor, TextLayer, TextToken};
pub use pipeline::{Pipeline, Stage, SubmitOutcome};
pub use recognize::{
    CandidateSet, FieldCandidate, FieldKind, FieldRecognizer, LineItemCandidate, TokenSpan,
};
pub use store::{InvoiceStore, MemoryStore, VendorMatch};
pub use validate::{ExtractionResult, Validator};
