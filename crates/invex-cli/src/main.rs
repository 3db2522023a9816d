//! CLI application for PDF invoice extraction.

mod commands;
mod store;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, get, vendor};

/// invex - extract structured data from PDF invoices
#[derive(Parser)]
#[command(name = "invex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and store an invoice from a PDF file
    Extract(extract::ExtractArgs),

    /// Look up a stored invoice by identifier
    Get(get::GetArgs),

    /// Look up stored invoices by vendor name
    Vendor(vendor::VendorArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Get(args) => get::run(args, cli.config.as_deref()).await,
        Commands::Vendor(args) => vendor::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
