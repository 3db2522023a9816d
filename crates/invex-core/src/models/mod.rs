//! Data models for extracted invoices and pipeline configuration.

pub mod config;
pub mod invoice;

pub use config::PipelineConfig;
pub use invoice::{Invoice, LineItem, SourceRef};
