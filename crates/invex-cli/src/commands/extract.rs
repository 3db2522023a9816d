//! Extract command - run one PDF through the pipeline and store it.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use tracing::info;

use invex_core::{Invoice, Pipeline, SubmitOutcome};

use super::load_config;
use crate::store::open_store;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Store file (default: platform data dir)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Abandon extraction after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Show the extraction confidence score
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);

    info!("processing {}", args.input.display());

    let store = open_store(args.store.as_deref(), config.store.vendor_match);
    let pipeline = Pipeline::with_config(config, store);

    let deadline = args
        .timeout_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let outcome = pipeline.submit(&data, filename.as_deref(), deadline)?;

    match outcome {
        SubmitOutcome::Stored(invoice) => {
            println!(
                "{} stored invoice {}",
                style("✓").green(),
                style(&invoice.id).bold()
            );
            print_invoice(&invoice, args.format)?;
            if args.show_confidence {
                println!("confidence: {:.1}%", invoice.confidence * 100.0);
            }
        }
        SubmitOutcome::PartialFailure { draft, missing } => {
            eprintln!(
                "{} low-confidence extraction, not stored",
                style("!").yellow()
            );
            for field in &missing {
                eprintln!("  missing: {field}");
            }
            print_invoice(&draft, args.format)?;
            if args.show_confidence {
                println!("confidence: {:.1}%", draft.confidence * 100.0);
            }
        }
        SubmitOutcome::Rejected { reason } => {
            eprintln!("{} rejected: {reason}", style("✗").red());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_invoice(invoice: &Invoice, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(invoice)?),
        OutputFormat::Text => {
            println!("vendor:   {}", invoice.vendor);
            println!("total:    {} {}", invoice.total, invoice.currency);
            if let Some(date) = invoice.issue_date {
                println!("date:     {date}");
            }
            for item in &invoice.line_items {
                println!(
                    "  {} x{} @ {} = {}",
                    item.description, item.quantity, item.unit_price, item.line_total
                );
            }
            if invoice.total_mismatch {
                println!("{} line items do not sum to the total", style("!").yellow());
            }
        }
    }
    Ok(())
}
