//! Ingest command - extract and store a single invoice file.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use super::Context;

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Media type of the input (default: derived from the extension)
    #[arg(short, long)]
    file_type: Option<String>,
}

pub async fn run(args: IngestArgs, ctx: &Context) -> anyhow::Result<()> {
    let file_type = match args.file_type {
        Some(t) => t,
        None => media_type_for(&args.input)?,
    };

    info!("ingesting {} as {}", args.input.display(), file_type);

    let service = ctx.open_service().await?;
    let aggregate = service.ingest(&args.input, &file_type).await?;
    let invoice = &aggregate.invoice;

    println!(
        "{} Stored invoice {} ({})",
        style("✓").green(),
        style(invoice.id).cyan(),
        invoice.status
    );
    println!("  Invoice no:  {}", display_or_dash(&invoice.invoice_no));
    println!("  Date:        {}", display_or_dash(&invoice.invoice_date));
    println!("  Vendor:      {}", display_or_dash(&invoice.vendor_name));
    println!("  GST no:      {}", display_or_dash(&invoice.gst_no));
    println!("  Subtotal:    {}", invoice.subtotal);
    println!("  Tax:         {}", invoice.tax);
    println!("  Grand total: {}", invoice.grand_total);
    println!("  Line items:  {}", aggregate.line_items.len());

    Ok(())
}

fn media_type_for(path: &std::path::Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let media_type = match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" => "image/jpg",
        "jpeg" => "image/jpeg",
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    Ok(media_type.to_string())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
