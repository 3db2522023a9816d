//! Vendor command - look up stored invoices by vendor name.

use std::path::PathBuf;

use clap::Args;
use console::style;

use invex_core::store::{InvoiceStore, VendorMatch};

use super::load_config;
use crate::store::open_store;

/// Arguments for the vendor command.
#[derive(Args)]
pub struct VendorArgs {
    /// Vendor name to search for (case-insensitive)
    #[arg(required = true)]
    name: String,

    /// Match on name prefix instead of the exact name
    #[arg(long)]
    prefix: bool,

    /// Store file (default: platform data dir)
    #[arg(short, long)]
    store: Option<PathBuf>,
}

pub async fn run(args: VendorArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let policy = if args.prefix {
        VendorMatch::Prefix
    } else {
        config.store.vendor_match
    };
    let store = open_store(args.store.as_deref(), policy);

    let invoices = store.get_by_vendor(&args.name)?;
    if invoices.is_empty() {
        // No matches is a valid empty result, not an error.
        eprintln!("{} no invoices for vendor {:?}", style("ℹ").blue(), args.name);
    }
    println!("{}", serde_json::to_string_pretty(&invoices)?);

    Ok(())
}
