//! Core library for invoice capture and review.
//!
//! This crate provides:
//! - Artifact validation and text sources (PDF text layer, pluggable OCR)
//! - Rule-based field extraction (header fields, amounts, line items)
//! - A SQLite-backed invoice store with atomic aggregate writes
//! - Correction and export workflows over stored invoices

pub mod error;
pub mod extract;
pub mod models;
pub mod repo;
pub mod service;
pub mod source;

pub use error::{ExtractionError, InvexError, PersistenceError, Result, ValidationError};
pub use extract::{AmountReconciler, Amounts, FieldExtractor, HeaderFields, InvoiceExtractor,
    LineItemParser, NormalizedText};
pub use models::{
    Invoice, InvoiceAggregate, InvoiceStatus, InvoiceUpdate, InvexConfig, LineItem, LineItemEdit,
    StoreConfig, UploadConfig,
};
pub use repo::InvoiceRepository;
pub use service::InvoiceService;
pub use source::{DocumentKind, PdfTextLayer, TextRecognizer};
