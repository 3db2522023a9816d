//! Candidate validation and normalization.

mod normalizer;

pub use normalizer::{Validator, parse_amount, parse_date};

use crate::models::invoice::Invoice;
use crate::recognize::FieldKind;

/// Tagged outcome of a single extraction attempt.
///
/// Created once per request and immutable afterwards. Only a `Success`
/// outcome yields a stored invoice; callers must handle all three
/// variants explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// All recognized fields coerced cleanly.
    Success(Invoice),

    /// A required field (vendor name, total amount) was missing or
    /// uncoercible. Fatal for this submission.
    Rejected {
        reason: String,
    },

    /// Extraction succeeded with low confidence: a best-effort draft
    /// plus the fields that were missing or failed to coerce.
    PartialFailure {
        draft: Invoice,
        missing: Vec<FieldKind>,
    },
}
