//! JSON-file-backed invoice store.
//!
//! One document per store file, rewritten on each save. Enough for a
//! single-process CLI; a real deployment would swap in a database
//! behind the same trait.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use invex_core::error::StoreError;
use invex_core::models::invoice::Invoice;
use invex_core::store::{InvoiceStore, Result, VendorMatch};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Invoices in insertion order.
    invoices: Vec<Invoice>,
}

/// File-backed store implementing the core save/lookup contract.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    vendor_match: VendorMatch,
    /// Serializes read-modify-write cycles on the store file.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>, vendor_match: VendorMatch) -> Self {
        Self {
            path: path.into(),
            vendor_match,
            write_lock: Mutex::new(()),
        }
    }

    /// Default store location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("invex")
            .join("invoices.json")
    }

    fn load(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Backend(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Backend(format!("parse {}: {e}", self.path.display())))
    }

    fn persist(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("create {}: {e}", parent.display())))?;
        }
        let content = serde_json::to_string_pretty(file)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(&self.path, content)
            .map_err(|e| StoreError::Backend(format!("write {}: {e}", self.path.display())))
    }
}

impl InvoiceStore for JsonFileStore {
    fn save(&self, invoice: Invoice) -> Result<String> {
        let _guard = self.write_lock.lock();
        let mut file = self.load()?;
        let id = invoice.id.clone();

        // Same identifier replaces the existing record in place.
        match file.invoices.iter_mut().find(|i| i.id == id) {
            Some(existing) => *existing = invoice,
            None => file.invoices.push(invoice),
        }

        self.persist(&file)?;
        debug!(%id, path = %self.path.display(), "invoice saved");
        Ok(id)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self.load()?.invoices.into_iter().find(|i| i.id == id))
    }

    fn get_by_vendor(&self, vendor: &str) -> Result<Vec<Invoice>> {
        Ok(self
            .load()?
            .invoices
            .into_iter()
            .filter(|i| self.vendor_match.matches(&i.vendor, vendor))
            .collect())
    }
}

/// Open the store configured by the CLI flags.
pub fn open_store(path: Option<&Path>, vendor_match: VendorMatch) -> JsonFileStore {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(JsonFileStore::default_path);
    JsonFileStore::open(path, vendor_match)
}
