//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::VendorMatch;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Field recognition configuration.
    pub recognizer: RecognizerConfig,

    /// Validation and normalization configuration.
    pub validation: ValidationConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Field recognizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Score below which a labeled candidate is discarded.
    pub min_candidate_score: f32,

    /// Fall back to the first text line on page one when no labeled
    /// vendor candidate is found (letterhead heuristic).
    pub letterhead_vendor_fallback: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            min_candidate_score: 0.3,
            letterhead_vendor_fallback: true,
        }
    }
}

/// Validator/normalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Tolerance when comparing the line-item sum to the stated total.
    pub amount_tolerance: Decimal,

    /// Confidence penalty applied when the line-item sum disagrees with
    /// the stated total beyond tolerance.
    pub mismatch_penalty: f32,

    /// Currency assumed when none can be recognized or inferred.
    pub default_currency: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(1, 2), // 0.01
            mismatch_penalty: 0.15,
            default_currency: "USD".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Vendor lookup matching policy.
    pub vendor_match: VendorMatch,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            vendor_match: VendorMatch::Exact,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
