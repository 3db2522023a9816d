//! Get command - look up a stored invoice by identifier.

use std::path::PathBuf;

use clap::Args;
use console::style;

use invex_core::store::InvoiceStore;

use super::load_config;
use crate::store::open_store;

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Invoice identifier
    #[arg(required = true)]
    id: String,

    /// Store file (default: platform data dir)
    #[arg(short, long)]
    store: Option<PathBuf>,
}

pub async fn run(args: GetArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(args.store.as_deref(), config.store.vendor_match);

    match store.get_by_id(&args.id)? {
        Some(invoice) => println!("{}", serde_json::to_string_pretty(&invoice)?),
        None => {
            eprintln!("{} no invoice with id {}", style("✗").red(), args.id);
            std::process::exit(1);
        }
    }

    Ok(())
}
