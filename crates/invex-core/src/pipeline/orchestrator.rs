//! The pipeline orchestrator: format gating, stage sequencing, deadline
//! enforcement, and the single persist call.

use std::time::Instant;

use tracing::{debug, info};

use super::{Result, Stage, SubmitOutcome};
use crate::error::PipelineError;
use crate::models::config::PipelineConfig;
use crate::models::invoice::{Invoice, SourceRef};
use crate::pdf::{PdfTextExtractor, TextExtractor};
use crate::recognize::FieldRecognizer;
use crate::store::InvoiceStore;
use crate::validate::{ExtractionResult, Validator};

/// Sequences text extraction, field recognition, validation, and
/// persistence. Holds no shared mutable state: `submit` takes `&self`
/// and concurrent requests need no coordination beyond the store's own.
pub struct Pipeline<S> {
    extractor: PdfTextExtractor,
    recognizer: FieldRecognizer,
    validator: Validator,
    store: S,
}

impl<S: InvoiceStore> Pipeline<S> {
    /// Create a pipeline with default configuration around an injected
    /// store.
    pub fn new(store: S) -> Self {
        Self::with_config(PipelineConfig::default(), store)
    }

    pub fn with_config(config: PipelineConfig, store: S) -> Self {
        Self {
            extractor: PdfTextExtractor::new(),
            recognizer: FieldRecognizer::with_config(config.recognizer),
            validator: Validator::with_config(config.validation),
            store,
        }
    }

    /// Access the injected store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one document through the pipeline.
    ///
    /// Exactly one `save` call happens on a successful validation, none
    /// otherwise. When `deadline` elapses the in-flight extraction is
    /// abandoned at the next stage boundary with no store write.
    pub fn submit(
        &self,
        data: &[u8],
        filename: Option<&str>,
        deadline: Option<Instant>,
    ) -> Result<SubmitOutcome> {
        debug!(bytes = data.len(), ?filename, stage = %Stage::Received, "submission received");
        check_deadline(deadline, Stage::Received)?;

        let layer = self.extractor.extract_tokens(data)?;
        debug!(tokens = layer.tokens.len(), pages = layer.pages, stage = %Stage::TextExtracted, "text layer extracted");
        check_deadline(deadline, Stage::TextExtracted)?;

        let candidates = self.recognizer.recognize(&layer.tokens);
        debug!(stage = %Stage::FieldsCandidate, "fields recognized");
        check_deadline(deadline, Stage::FieldsCandidate)?;

        let source = SourceRef {
            filename: filename.map(str::to_string),
            pages: layer.pages,
        };
        let result = self.validator.validate(&candidates, source);
        // Checked after validation and before persisting: a timed-out
        // request must not leave a partial store write behind.
        check_deadline(deadline, Stage::Validated)?;

        match result {
            ExtractionResult::Success(invoice) => {
                let id = self.store.save(invoice.clone())?;
                info!(%id, vendor = %invoice.vendor, stage = %Stage::Stored, "invoice stored");
                Ok(SubmitOutcome::Stored(invoice))
            }
            ExtractionResult::Rejected { reason } => {
                info!(%reason, "submission rejected");
                Ok(SubmitOutcome::Rejected { reason })
            }
            ExtractionResult::PartialFailure { draft, missing } => {
                info!(
                    missing = missing.len(),
                    confidence = draft.confidence,
                    "partial extraction, not stored"
                );
                Ok(SubmitOutcome::PartialFailure { draft, missing })
            }
        }
    }

    /// Look up a stored invoice by identifier. `None` is a valid miss.
    pub fn find_by_id(&self, id: &str) -> crate::store::Result<Option<Invoice>> {
        self.store.get_by_id(id)
    }

    /// Look up stored invoices by vendor name.
    pub fn find_by_vendor(&self, vendor: &str) -> crate::store::Result<Vec<Invoice>> {
        self.store.get_by_vendor(vendor)
    }
}

fn check_deadline(deadline: Option<Instant>, stage: Stage) -> Result<()> {
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            return Err(PipelineError::Timeout { stage });
        }
    }
    Ok(())
}
