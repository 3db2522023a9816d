//! In-memory record store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::{InvoiceStore, Result, VendorMatch};
use crate::models::invoice::Invoice;

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, Invoice>,
    /// Insertion order of identifiers, for ordered vendor lookups.
    order: Vec<String>,
}

/// Thread-safe in-memory store. The reference implementation of the
/// store contract and the test double for the pipeline.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    vendor_match: VendorMatch,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vendor_match(vendor_match: VendorMatch) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            vendor_match,
        }
    }

    /// Number of stored invoices.
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InvoiceStore for MemoryStore {
    fn save(&self, invoice: Invoice) -> Result<String> {
        let id = invoice.id.clone();
        let mut inner = self.inner.write();
        if inner.records.insert(id.clone(), invoice).is_none() {
            inner.order.push(id.clone());
        }
        debug!(%id, "invoice saved");
        Ok(id)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self.inner.read().records.get(id).cloned())
    }

    fn get_by_vendor(&self, vendor: &str) -> Result<Vec<Invoice>> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .filter(|invoice| self.vendor_match.matches(&invoice.vendor, vendor))
            .cloned()
            .collect())
    }
}
