//! Export command - write the invoice header projection as CSV.

use std::path::PathBuf;

use clap::Args;
use console::style;

use invex_core::Invoice;

use super::Context;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.open_service().await?;
    let rows = service.export_rows().await?;
    let data = format_csv(&rows)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &data)?;
            println!(
                "{} Exported {} invoice(s) to {}",
                style("✓").green(),
                rows.len(),
                path.display()
            );
        }
        None => print!("{data}"),
    }

    Ok(())
}

fn format_csv(rows: &[Invoice]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "invoice_no",
        "invoice_date",
        "vendor_name",
        "gst_no",
        "subtotal",
        "tax",
        "grand_total",
        "status",
        "created_at",
        "updated_at",
    ])?;

    for invoice in rows {
        wtr.write_record([
            invoice.id.to_string(),
            invoice.invoice_no.clone(),
            invoice.invoice_date.clone(),
            invoice.vendor_name.clone(),
            invoice.gst_no.clone(),
            invoice.subtotal.to_string(),
            invoice.tax.to_string(),
            invoice.grand_total.to_string(),
            invoice.status.to_string(),
            invoice.created_at.to_rfc3339(),
            invoice.updated_at.to_rfc3339(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
