//! Error types for the invex-core library.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// Input artifact rejected before extraction.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Recognizer or text-layer failure on an otherwise valid artifact.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Storage failure during create/replace/delete.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Operation referenced a non-existent invoice id.
    #[error("invoice not found: {0}")]
    NotFound(Uuid),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors for malformed or disallowed input artifacts.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The artifact's media type is not accepted.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The artifact exceeds the configured size limit.
    #[error("file is {size} bytes, limit is {limit}")]
    Oversize { size: u64, limit: u64 },

    /// The artifact path does not exist.
    #[error("file not found: {}", .0.display())]
    Missing(PathBuf),
}

/// Errors from the text-source collaborators.
///
/// Absence of field matches is never an error; only recognizer and
/// text-layer failures surface here.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The PDF text layer could not be read.
    #[error("failed to extract PDF text layer: {0}")]
    PdfTextLayer(String),

    /// The OCR recognizer failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No recognizer is wired for this artifact kind.
    #[error("no text recognizer configured for {0} files")]
    NoRecognizer(String),
}

/// Errors from the invoice store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open the store.
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A query failed. Carries the failing operation and the underlying cause.
    #[error("{op} failed: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
