//! Invoice aggregate models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// An invoice header row.
///
/// String fields hold whatever substring extraction matched and may be
/// empty; amounts default to zero when unextracted. `invoice_date` is the
/// raw date token, not normalized to a calendar type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Opaque unique identifier, generated at creation, immutable.
    pub id: Uuid,

    /// Invoice number as printed on the document.
    pub invoice_no: String,

    /// Invoice date token as printed on the document.
    pub invoice_date: String,

    /// Vendor (issuer) name.
    pub vendor_name: String,

    /// Tax identifier (GST number).
    pub gst_no: String,

    /// Amount before tax.
    pub subtotal: Decimal,

    /// Sum of all tax components.
    pub tax: Decimal,

    /// Final payable amount.
    pub grand_total: Decimal,

    /// Review lifecycle status.
    pub status: InvoiceStatus,

    /// Path of the source artifact.
    pub file_path: String,

    /// Media type of the source artifact.
    pub file_type: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A single line item, owned exclusively by one invoice.
///
/// Line items carry no identity beyond their position in the invoice's
/// ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,

    /// Quantity.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Line total. Taken verbatim from extraction; re-derived from
    /// quantity and unit price when a human edits the item.
    pub amount: Decimal,
}

impl LineItem {
    /// Build a line item from a manual correction, deriving the amount.
    pub fn from_edit(edit: LineItemEdit) -> Self {
        Self {
            amount: edit.quantity * edit.unit_price,
            description: edit.description,
            quantity: edit.quantity,
            unit_price: edit.unit_price,
        }
    }
}

/// A manually corrected line item. The amount is never supplied by the
/// editor; it is derived as `quantity * unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemEdit {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Review lifecycle status of an invoice.
///
/// No transition order is enforced; correction may set any value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Freshly ingested, not yet reviewed.
    #[default]
    Uploaded,
    /// Reviewed and corrected by a human.
    Verified,
    /// Included in an export.
    Exported,
}

impl InvoiceStatus {
    /// Stable textual form used in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Uploaded => "Uploaded",
            InvoiceStatus::Verified => "Verified",
            InvoiceStatus::Exported => "Exported",
        }
    }
}

/// Error for unrecognized status text.
#[derive(Error, Debug)]
#[error("unknown invoice status: {0}")]
pub struct ParseStatusError(String);

impl std::str::FromStr for InvoiceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Uploaded" => Ok(InvoiceStatus::Uploaded),
            "Verified" => Ok(InvoiceStatus::Verified),
            "Exported" => Ok(InvoiceStatus::Exported),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice header together with its ordered line items, always
/// read and written as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceAggregate {
    pub invoice: Invoice,
    pub line_items: Vec<LineItem>,
}

/// Full header replacement applied by the correction workflow.
///
/// Every field is written; this is not a patch. Values that violate
/// `grand_total == subtotal + tax` are accepted as supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub invoice_no: String,
    pub invoice_date: String,
    pub vendor_name: String,
    pub gst_no: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
}
