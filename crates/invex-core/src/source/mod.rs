//! Text sources for uploaded artifacts.
//!
//! Two routes produce raw text for the extractor: the embedded text
//! layer of a PDF, and an OCR recognizer for images. Both are fallible;
//! a failed source surfaces as an error rather than an empty invoice.

use std::path::Path;

use crate::error::{ExtractionError, ValidationError};

/// Artifact kind, derived from the declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with an embedded text layer.
    Pdf,
    /// Raster image requiring OCR.
    Image,
}

impl DocumentKind {
    /// Classify a declared media type, rejecting anything unsupported.
    pub fn from_file_type(file_type: &str) -> Result<Self, ValidationError> {
        match file_type {
            "application/pdf" => Ok(Self::Pdf),
            "image/jpeg" | "image/jpg" | "image/png" => Ok(Self::Image),
            other => Err(ValidationError::UnsupportedType(other.to_string())),
        }
    }
}

/// A source of recognized text for an artifact on disk.
///
/// Implementations must be thread-safe so a single service instance
/// can be shared across tasks.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Text source backed by the PDF's own text layer.
#[derive(Debug, Default)]
pub struct PdfTextLayer;

impl PdfTextLayer {
    pub fn new() -> Self {
        Self
    }
}

impl TextRecognizer for PdfTextLayer {
    fn recognize(&self, path: &Path) -> Result<String, ExtractionError> {
        pdf_extract::extract_text(path)
            .map_err(|e| ExtractionError::PdfTextLayer(e.to_string()))
    }
}
