//! Delete command - remove an invoice and its line items.

use clap::Args;
use console::style;
use uuid::Uuid;

use super::Context;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Invoice id
    #[arg(required = true)]
    id: Uuid,
}

pub async fn run(args: DeleteArgs, ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.open_service().await?;
    service.delete(args.id).await?;

    println!("{} Deleted invoice {}", style("✓").green(), args.id);
    Ok(())
}
