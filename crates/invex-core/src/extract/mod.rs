//! Rule-based invoice extraction.
//!
//! Extraction is deterministic: identical text always yields identical
//! field values. That determinism is the only accuracy guarantee
//! offered; an unmatched field yields an empty or zero value, never an
//! error.

pub mod amounts;
pub mod assembler;
pub mod fields;
pub mod line_items;
pub mod normalize;
pub mod rules;

pub use amounts::{AmountReconciler, Amounts, parse_amount};
pub use assembler::InvoiceAssembler;
pub use fields::{FieldExtractor, HeaderFields};
pub use line_items::{LineItemParser, LineItemScanner};
pub use normalize::NormalizedText;

use tracing::info;

use crate::models::InvoiceAggregate;

/// Composition root for the extraction pipeline.
///
/// Runs the three extractors over one normalization of the text. They
/// are order-independent; their outputs combine deterministically
/// regardless of evaluation order.
#[derive(Debug, Default)]
pub struct InvoiceExtractor {
    fields: FieldExtractor,
    amounts: AmountReconciler,
    line_items: LineItemParser,
    assembler: InvoiceAssembler,
}

impl InvoiceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract a full invoice aggregate from recognized text.
    pub fn extract(&self, raw_text: &str, file_path: &str, file_type: &str) -> InvoiceAggregate {
        let text = NormalizedText::new(raw_text);

        let header = self.fields.extract(&text);
        let amounts = self.amounts.reconcile(&text);
        let items = self.line_items.parse(&text);

        info!(
            invoice_no = %header.invoice_no,
            line_items = items.len(),
            "extracted invoice from {} characters of text",
            raw_text.len()
        );

        self.assembler
            .assemble(header, amounts, items, file_path, file_type)
    }
}
