//! Header field extraction.

use super::normalize::NormalizedText;
use super::rules::{DATE_RULES, GST_RULES, INVOICE_NO_RULES, VENDOR_RULES};

/// Extracted header fields. Each field is independently optional and
/// empty when no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub invoice_no: String,
    pub invoice_date: String,
    pub vendor_name: String,
    pub gst_no: String,
}

/// Rule-driven header field extractor.
///
/// Fields are extracted independently; overlapping vocabularies between
/// fields are resolved purely by each field's own rule order, never by
/// cross-field coordination.
#[derive(Debug, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract header fields from normalized text.
    pub fn extract(&self, text: &NormalizedText) -> HeaderFields {
        let whole = text.text();

        // Vendor falls back to the first non-empty line only after
        // every vendor rule has failed.
        let vendor_name = VENDOR_RULES
            .first_match(whole)
            .or_else(|| text.first_line().map(str::to_string))
            .unwrap_or_default();

        HeaderFields {
            invoice_no: INVOICE_NO_RULES.first_match(whole).unwrap_or_default(),
            invoice_date: DATE_RULES.first_match(whole).unwrap_or_default(),
            vendor_name,
            gst_no: GST_RULES.first_match(whole).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(raw: &str) -> HeaderFields {
        FieldExtractor::new().extract(&NormalizedText::new(raw))
    }

    #[test]
    fn test_extract_invoice_number() {
        let fields = extract("Invoice No: INV-2024-001");
        assert_eq!(fields.invoice_no, "INV-2024-001");
    }

    #[test]
    fn test_extract_bill_number_variant() {
        let fields = extract("Bill Number: 8842-A");
        assert_eq!(fields.invoice_no, "8842-A");
    }

    #[test]
    fn test_extract_labeled_date() {
        let fields = extract("Date: 15/01/2024\n02/02/2022");
        assert_eq!(fields.invoice_date, "15/01/2024");
    }

    #[test]
    fn test_extract_bare_date() {
        let fields = extract("issued 15-01-24 by accounts");
        assert_eq!(fields.invoice_date, "15-01-24");
    }

    #[test]
    fn test_extract_labeled_vendor() {
        let fields = extract("Plumbing Supplies\nVendor: Acme Corp Ltd.\n");
        assert_eq!(fields.vendor_name, "Acme Corp Ltd.");
    }

    #[test]
    fn test_vendor_falls_back_to_first_line() {
        let fields = extract("Acme Corp Ltd\nInvoice No: INV-1\n");
        assert_eq!(fields.vendor_name, "Acme Corp Ltd");
    }

    #[test]
    fn test_extract_gst_number() {
        let fields = extract("GSTIN: 22AAAAA0000A1Z5");
        assert_eq!(fields.gst_no, "22AAAAA0000A1Z5");
    }

    #[test]
    fn test_bare_gst_structural_form() {
        let fields = extract("registered as 22AAAAA0000A1Z5");
        assert_eq!(fields.gst_no, "22AAAAA0000A1Z5");
    }

    #[test]
    fn test_no_matches_yields_empty_fields() {
        let fields = extract("");
        assert_eq!(fields, HeaderFields::default());
    }
}
