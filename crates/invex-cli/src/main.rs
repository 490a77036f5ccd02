//! CLI application for invoice capture and review.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{delete, edit, export, ingest, list, show};

/// Invoice capture - extract structured data from invoice files
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

    /// Override the store database path
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a single invoice file into the store
    Ingest(ingest::IngestArgs),

    /// List stored invoices, newest first
    List(list::ListArgs),

    /// Show one invoice with its line items
    Show(show::ShowArgs),

    /// Apply a correction to a stored invoice
    Edit(edit::EditArgs),

    /// Delete an invoice and its line items
    Delete(delete::DeleteArgs),

    /// Export all invoices as CSV
    Export(export::ExportArgs),
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

    let ctx = commands::Context::load(cli.config.as_deref(), cli.store.as_deref())?;

    match cli.command {
        Commands::Ingest(args) => ingest::run(args, &ctx).await,
        Commands::List(args) => list::run(args, &ctx).await,
        Commands::Show(args) => show::run(args, &ctx).await,
        Commands::Edit(args) => edit::run(args, &ctx).await,
        Commands::Delete(args) => delete::run(args, &ctx).await,
        Commands::Export(args) => export::run(args, &ctx).await,
    }
}
