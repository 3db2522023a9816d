//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// Document loading/parsing error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Pipeline error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a byte stream into text tokens.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The magic bytes do not match the PDF signature.
    #[error("input is not a PDF document")]
    UnsupportedFormat,

    /// The byte stream could not be parsed as a PDF container.
    #[error("malformed PDF document: {0}")]
    Malformed(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The text layer could not be decoded.
    #[error("failed to extract text layer: {0}")]
    TextLayer(String),
}

/// Errors raised by a record store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend failed to complete the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors raised by the extraction pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Document could not be read.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The external deadline elapsed before the pipeline finished.
    #[error("deadline exceeded during {stage}")]
    Timeout { stage: crate::pipeline::Stage },

    /// The store failed while persisting a validated invoice.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
