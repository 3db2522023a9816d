//! Invoice record store interface.
//!
//! The pipeline consumes this contract as an injected dependency; the
//! persistence mechanics belong to the implementation. Each call is
//! independently consistent; no transaction spans multiple calls.

mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::invoice::Invoice;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Vendor lookup matching policy. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorMatch {
    /// Exact name match.
    #[default]
    Exact,
    /// The stored vendor name starts with the query.
    Prefix,
}

impl VendorMatch {
    /// Whether `stored` matches `query` under this policy.
    pub fn matches(&self, stored: &str, query: &str) -> bool {
        let stored = stored.to_lowercase();
        let query = query.to_lowercase();
        match self {
            VendorMatch::Exact => stored == query,
            VendorMatch::Prefix => stored.starts_with(&query),
        }
    }
}

/// Save/lookup contract for extracted invoices.
///
/// Implementations provide read-after-write visibility within the
/// process: a `get_by_id` immediately after `save` returns the record.
pub trait InvoiceStore: Send + Sync {
    /// Persist an invoice and return its identifier.
    fn save(&self, invoice: Invoice) -> Result<String>;

    /// Fetch an invoice by identifier. `None` means not found, which is
    /// a valid negative result, not an error.
    fn get_by_id(&self, id: &str) -> Result<Option<Invoice>>;

    /// Fetch all invoices for a vendor, insertion-ordered. An empty
    /// vector means no matches, never an error.
    fn get_by_vendor(&self, vendor: &str) -> Result<Vec<Invoice>>;
}
