//! Configuration structures for the capture pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Store configuration.
    pub store: StoreConfig,

    /// Upload acceptance rules.
    pub upload: UploadConfig,
}

impl Default for InvexConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

/// Invoice store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("invoices.db"),
        }
    }
}

/// Rules applied to inbound artifacts before extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum artifact size in bytes.
    pub max_bytes: u64,

    /// Accepted media types.
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            allowed_types: vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/png".to_string(),
            ],
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
