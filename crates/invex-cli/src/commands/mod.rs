//! Command implementations.

pub mod delete;
pub mod edit;
pub mod export;
pub mod ingest;
pub mod list;
pub mod show;

use std::path::Path;

use invex_core::{InvexConfig, InvoiceRepository, InvoiceService};

/// Shared command context: resolved configuration.
pub struct Context {
    config: InvexConfig,
}

impl Context {
    /// Resolve configuration from an optional config file, with the
    /// store path override taking precedence.
    pub fn load(config_path: Option<&str>, store: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) => InvexConfig::from_file(Path::new(path))?,
            None => InvexConfig::default(),
        };

        if let Some(path) = store {
            config.store.database_path = path.to_path_buf();
        }

        Ok(Self { config })
    }

    /// Open the store and wrap it in a service.
    pub async fn open_service(&self) -> anyhow::Result<InvoiceService> {
        let repository = InvoiceRepository::open(&self.config.store.database_path).await?;
        Ok(InvoiceService::new(
            repository,
            self.config.upload.clone(),
        ))
    }
}
