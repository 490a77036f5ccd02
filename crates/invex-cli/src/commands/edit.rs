//! Edit command - apply a manual correction from a JSON document.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Deserialize;
use uuid::Uuid;

use invex_core::{InvoiceUpdate, LineItemEdit};

use super::Context;

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Invoice id
    #[arg(required = true)]
    id: Uuid,

    /// JSON correction document
    #[arg(required = true)]
    correction: PathBuf,
}

/// On-disk correction document: the full replacement header plus the
/// full new line-item set. Line-item amounts are derived, not supplied.
#[derive(Deserialize)]
struct CorrectionDoc {
    #[serde(flatten)]
    update: InvoiceUpdate,
    #[serde(default)]
    line_items: Vec<LineItemEdit>,
}

pub async fn run(args: EditArgs, ctx: &Context) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.correction)?;
    let doc: CorrectionDoc = serde_json::from_str(&content)?;

    let service = ctx.open_service().await?;
    let corrected = service.update(args.id, doc.update, doc.line_items).await?;

    println!(
        "{} Updated invoice {} ({}, {} line item(s))",
        style("✓").green(),
        corrected.invoice.id,
        corrected.invoice.status,
        corrected.line_items.len(),
    );

    Ok(())
}
