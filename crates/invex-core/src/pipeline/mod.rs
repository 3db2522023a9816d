//! Extraction pipeline orchestration.

mod orchestrator;

pub use orchestrator::Pipeline;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::models::invoice::Invoice;
use crate::recognize::FieldKind;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline stages, in order. `Rejected`, `PartialFailure` and `Stored`
/// are the terminal states; any stage failure is terminal for the
/// request and the caller may resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    TextExtracted,
    FieldsCandidate,
    Validated,
    Stored,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::TextExtracted => "text_extracted",
            Stage::FieldsCandidate => "fields_candidate",
            Stage::Validated => "validated",
            Stage::Stored => "stored",
        };
        f.write_str(name)
    }
}

/// Outcome of a submission that ran the pipeline to a terminal state.
///
/// Format and parse failures (`UnsupportedFormat`, malformed documents,
/// timeouts) surface as [`PipelineError`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Extraction validated and the invoice was persisted.
    Stored(Invoice),

    /// Extraction succeeded with low confidence. The draft is returned
    /// for manual review and nothing is persisted.
    PartialFailure {
        draft: Invoice,
        missing: Vec<FieldKind>,
    },

    /// Required fields were absent or uncoercible. Nothing is persisted;
    /// the caller must resubmit a corrected source.
    Rejected {
        reason: String,
    },
}
