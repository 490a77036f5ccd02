//! List command - enumerate stored invoices, newest first.

use clap::Args;
use console::style;

use super::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.open_service().await?;
    let invoices = service.list().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&invoices)?);
        return Ok(());
    }

    if invoices.is_empty() {
        println!("No invoices stored.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<16}  {:<24}  {:>12}  {:<10}",
        style("ID").bold(),
        style("INVOICE NO").bold(),
        style("VENDOR").bold(),
        style("TOTAL").bold(),
        style("STATUS").bold(),
    );

    for invoice in &invoices {
        println!(
            "{:<36}  {:<16}  {:<24}  {:>12}  {:<10}",
            invoice.id,
            truncate(&invoice.invoice_no, 16),
            truncate(&invoice.vendor_name, 24),
            invoice.grand_total,
            invoice.status,
        );
    }

    println!("\n{} invoice(s)", invoices.len());
    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
