//! Composition of extractor outputs into the invoice aggregate.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Invoice, InvoiceAggregate, InvoiceStatus, LineItem};

use super::amounts::Amounts;
use super::fields::HeaderFields;

/// Assembles extractor outputs into one invoice aggregate.
///
/// Pure composition: a fresh id, Uploaded status, and equal
/// creation/update timestamps. No extraction logic of its own.
#[derive(Debug, Default)]
pub struct InvoiceAssembler;

impl InvoiceAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        header: HeaderFields,
        amounts: Amounts,
        line_items: Vec<LineItem>,
        file_path: &str,
        file_type: &str,
    ) -> InvoiceAggregate {
        let now = Utc::now();

        InvoiceAggregate {
            invoice: Invoice {
                id: Uuid::new_v4(),
                invoice_no: header.invoice_no,
                invoice_date: header.invoice_date,
                vendor_name: header.vendor_name,
                gst_no: header.gst_no,
                subtotal: amounts.subtotal,
                tax: amounts.tax,
                grand_total: amounts.grand_total,
                status: InvoiceStatus::Uploaded,
                file_path: file_path.to_string(),
                file_type: file_type.to_string(),
                created_at: now,
                updated_at: now,
            },
            line_items,
        }
    }
}
