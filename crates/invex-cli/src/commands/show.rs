//! Show command - display one invoice with its line items.

use clap::Args;
use console::style;
use uuid::Uuid;

use super::Context;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Invoice id
    #[arg(required = true)]
    id: Uuid,

    /// Emit JSON instead of a summary
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ShowArgs, ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.open_service().await?;
    let aggregate = service.get(args.id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&aggregate)?);
        return Ok(());
    }

    let invoice = &aggregate.invoice;
    println!("{} {}", style("Invoice").bold(), invoice.id);
    println!("  Invoice no:  {}", invoice.invoice_no);
    println!("  Date:        {}", invoice.invoice_date);
    println!("  Vendor:      {}", invoice.vendor_name);
    println!("  GST no:      {}", invoice.gst_no);
    println!("  Subtotal:    {}", invoice.subtotal);
    println!("  Tax:         {}", invoice.tax);
    println!("  Grand total: {}", invoice.grand_total);
    println!("  Status:      {}", invoice.status);
    println!("  Source:      {} ({})", invoice.file_path, invoice.file_type);
    println!("  Created:     {}", invoice.created_at);
    println!("  Updated:     {}", invoice.updated_at);

    if aggregate.line_items.is_empty() {
        println!("\nNo line items.");
        return Ok(());
    }

    println!("\n{}", style("Line items").bold());
    for (i, item) in aggregate.line_items.iter().enumerate() {
        println!(
            "  {}. {}: {} x {} = {}",
            i + 1,
            item.description,
            item.quantity,
            item.unit_price,
            item.amount,
        );
    }

    Ok(())
}
