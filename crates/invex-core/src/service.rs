//! Ingestion and correction workflows over the store.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{ExtractionError, InvexError, Result, ValidationError};
use crate::extract::InvoiceExtractor;
use crate::models::{Invoice, InvoiceAggregate, InvoiceUpdate, LineItem, LineItemEdit, UploadConfig};
use crate::repo::InvoiceRepository;
use crate::source::{DocumentKind, PdfTextLayer, TextRecognizer};

/// Facade over validation, extraction, and the store.
///
/// Ingestion validates the artifact, recognizes its text, extracts an
/// invoice, and persists it as one aggregate. Correction replaces the
/// header and the full line-item set in one step.
pub struct InvoiceService {
    repository: InvoiceRepository,
    extractor: InvoiceExtractor,
    pdf: PdfTextLayer,
    recognizer: Option<Box<dyn TextRecognizer>>,
    upload: UploadConfig,
}

impl InvoiceService {
    pub fn new(repository: InvoiceRepository, upload: UploadConfig) -> Self {
        Self {
            repository,
            extractor: InvoiceExtractor::new(),
            pdf: PdfTextLayer::new(),
            recognizer: None,
            upload,
        }
    }

    /// Wire an OCR recognizer for image artifacts.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Ingest one artifact: validate, recognize text, extract, store.
    ///
    /// Extraction itself never fails; only validation, recognition,
    /// and persistence can surface errors here.
    pub async fn ingest(&self, path: &Path, file_type: &str) -> Result<InvoiceAggregate> {
        self.validate(path, file_type)?;

        let kind = DocumentKind::from_file_type(file_type).map_err(InvexError::Validation)?;
        let raw_text = match kind {
            DocumentKind::Pdf => self.pdf.recognize(path)?,
            DocumentKind::Image => match &self.recognizer {
                Some(recognizer) => recognizer.recognize(path)?,
                None => {
                    return Err(ExtractionError::NoRecognizer(file_type.to_string()).into());
                }
            },
        };

        if raw_text.trim().is_empty() {
            warn!(path = %path.display(), "no text recognized; storing empty invoice");
        }

        let aggregate =
            self.extractor
                .extract(&raw_text, &path.display().to_string(), file_type);
        self.repository.create(&aggregate).await?;

        info!(id = %aggregate.invoice.id, path = %path.display(), "ingested invoice");
        Ok(aggregate)
    }

    pub async fn list(&self) -> Result<Vec<Invoice>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: uuid::Uuid) -> Result<InvoiceAggregate> {
        self.repository.get(id).await
    }

    /// Apply a manual correction: full header replacement plus a new
    /// line-item set with amounts re-derived from the edits.
    pub async fn update(
        &self,
        id: uuid::Uuid,
        update: InvoiceUpdate,
        line_items: Vec<LineItemEdit>,
    ) -> Result<InvoiceAggregate> {
        let line_items: Vec<LineItem> = line_items.into_iter().map(LineItem::from_edit).collect();
        self.repository.replace(id, &update, &line_items).await?;
        self.repository.get(id).await
    }

    pub async fn delete(&self, id: uuid::Uuid) -> Result<()> {
        self.repository.delete(id).await
    }

    /// Flat header projection for export, most recent first.
    pub async fn export_rows(&self) -> Result<Vec<Invoice>> {
        self.repository.list().await
    }

    fn validate(&self, path: &Path, file_type: &str) -> Result<()> {
        if !path.exists() {
            return Err(ValidationError::Missing(path.to_path_buf()).into());
        }

        if !self.upload.allowed_types.iter().any(|t| t == file_type) {
            return Err(ValidationError::UnsupportedType(file_type.to_string()).into());
        }

        let size = std::fs::metadata(path)?.len();
        if size > self.upload.max_bytes {
            return Err(ValidationError::Oversize {
                size,
                limit: self.upload.max_bytes,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn service() -> InvoiceService {
        let repository = InvoiceRepository::open_in_memory().await.unwrap();
        InvoiceService::new(repository, UploadConfig::default())
    }

    #[tokio::test]
    async fn test_rejects_missing_file() {
        let err = service()
            .await
            .ingest(Path::new("nope.pdf"), "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvexError::Validation(ValidationError::Missing(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_type() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = service()
            .await
            .ingest(file.path(), "text/html")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvexError::Validation(ValidationError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversize_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        let repository = InvoiceRepository::open_in_memory().await.unwrap();
        let upload = UploadConfig {
            max_bytes: 16,
            ..UploadConfig::default()
        };
        let err = InvoiceService::new(repository, upload)
            .ingest(file.path(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvexError::Validation(ValidationError::Oversize { size: 64, limit: 16 })
        ));
    }

    #[tokio::test]
    async fn test_image_without_recognizer_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = service()
            .await
            .ingest(file.path(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvexError::Extraction(ExtractionError::NoRecognizer(_))
        ));
    }
}
