//! Amount extraction and reconciliation.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::normalize::NormalizedText;
use super::rules::{GRAND_TOTAL_RULES, SUBTOTAL_RULES, TAX_RULES};

/// Reconciled amounts. All values are non-negative and default to zero
/// when unextracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amounts {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

/// Amount reconciler.
///
/// Subtotal and grand total are first-match fields. Tax deliberately
/// differs: every match of every tax rule is summed, because real
/// invoices enumerate component taxes (CGST + SGST) on separate lines
/// that must be added, not chosen between.
#[derive(Debug, Default)]
pub struct AmountReconciler;

impl AmountReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Extract and reconcile amounts from normalized text.
    pub fn reconcile(&self, text: &NormalizedText) -> Amounts {
        let whole = text.text();

        let subtotal = SUBTOTAL_RULES
            .first_match(whole)
            .and_then(|raw| parse_amount(&raw))
            .unwrap_or_default();

        let tax: Decimal = TAX_RULES
            .all_matches(whole)
            .into_iter()
            .filter_map(parse_amount)
            .sum();

        // Grand total falls back to subtotal + tax when no rule matched;
        // with nothing extracted at all that degenerates to zero.
        let grand_total = GRAND_TOTAL_RULES
            .first_match(whole)
            .and_then(|raw| parse_amount(&raw))
            .unwrap_or(subtotal + tax);

        debug!(%subtotal, %tax, %grand_total, "reconciled amounts");

        Amounts {
            subtotal,
            tax,
            grand_total,
        }
    }
}

/// Parse a textual amount, stripping thousands separators.
///
/// Returns `None` when a non-numeric residue remains after stripping;
/// callers skip such matches rather than erroring.
pub fn parse_amount(raw: impl AsRef<str>) -> Option<Decimal> {
    let cleaned = raw.as_ref().trim().replace(',', "");
    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}
