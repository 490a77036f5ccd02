//! Ordered pattern-rule tables for invoice field extraction.
//!
//! Each header field owns an ordered list of (pattern, capture-group)
//! rules, most specific first. Rules are evaluated against the whole
//! text in fixed priority order; the first rule that matches anywhere
//! wins. Keeping the tables data-driven lets tests add or reorder
//! rules without touching control flow.

use lazy_static::lazy_static;
use regex::Regex;

/// A single extraction rule: a pattern and the capture group that
/// holds the field value.
#[derive(Debug)]
pub struct FieldRule {
    pattern: Regex,
    group: usize,
}

impl FieldRule {
    fn new(pattern: &str, group: usize) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("invalid field rule pattern"),
            group,
        }
    }
}

/// An ordered list of rules for one field.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Capture of the first rule that matches anywhere in the text.
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(text)
                .and_then(|caps| caps.get(rule.group))
                .map(|m| m.as_str().trim().to_string())
        })
    }

    /// Every capture of every rule, scanned globally.
    ///
    /// Matches are returned in rule order, then document order within
    /// a rule. Used where components must be summed rather than chosen
    /// between.
    pub fn all_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut out = Vec::new();
        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                if let Some(m) = caps.get(rule.group) {
                    out.push(m.as_str());
                }
            }
        }
        out
    }
}

lazy_static! {
    /// Invoice number, labeled "invoice", "inv", or "bill".
    pub static ref INVOICE_NO_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)invoice\s*(?:no|number|#)[:\s]*([A-Z0-9-]+)", 1),
        FieldRule::new(r"(?i)inv\s*(?:no|#)[:\s]*([A-Z0-9-]+)", 1),
        FieldRule::new(r"(?i)bill\s*(?:no|number)[:\s]*([A-Z0-9-]+)", 1),
    ]);

    /// Invoice date: labeled first, then any bare date token.
    pub static ref DATE_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)date[:\s]*(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})", 1),
        FieldRule::new(r"(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})", 1),
        FieldRule::new(r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})", 1),
    ]);

    /// Vendor name. When every rule fails the caller falls back to the
    /// first non-empty line of the document.
    pub static ref VENDOR_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)(?:vendor|company|seller)[:\s]*([A-Za-z0-9\s&.,]+)", 1),
        FieldRule::new(r"(?i)from[:\s]*([A-Za-z0-9\s&.,]+)", 1),
    ]);

    /// GST number: labeled 15-character id, then the bare structural form.
    pub static ref GST_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)GST(?:IN)?[:\s]*([A-Z0-9]{15})", 1),
        FieldRule::new(r"(?i)GSTIN[:\s]*([A-Z0-9]{15})", 1),
        FieldRule::new(r"([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z])", 1),
    ]);

    /// Subtotal: "subtotal"/"total" first, then a bare "amount" label.
    pub static ref SUBTOTAL_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)(?:sub)?total[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
        FieldRule::new(r"(?i)amount[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
    ]);

    /// Tax components. Every match of every rule is summed, because
    /// invoices enumerate component taxes on separate lines. Word
    /// boundaries keep a "CGST" line from also satisfying the generic
    /// "gst" rule and being counted twice.
    pub static ref TAX_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)\b(?:tax|gst|vat)\b[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
        FieldRule::new(r"(?i)\bcgst\b[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
        FieldRule::new(r"(?i)\bsgst\b[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
    ]);

    /// Grand total. The leading rule overlaps SUBTOTAL_RULES on plain
    /// "Total:" lines; the overlap is resolved purely by per-field rule
    /// order and both fields may capture the same number.
    pub static ref GRAND_TOTAL_RULES: RuleSet = RuleSet::new(vec![
        FieldRule::new(r"(?i)(?:grand\s*)?total[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
        FieldRule::new(r"(?i)net\s*amount[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
        FieldRule::new(r"(?i)total\s*amount[:\s]*(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)", 1),
    ]);

    /// Line-item row: description, integer quantity, unit price, amount.
    pub static ref LINE_ITEM_PATTERN: Regex = Regex::new(
        r"(?i)([A-Za-z\s]+)\s+(\d+)\s+(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)\s+(?:rs\.?|₹)?\s*([0-9,]+\.?\d*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_rule_order() {
        // "Bill No" is a lower-priority rule than "Invoice No".
        let text = "Bill No: B-77\nInvoice No: INV-1";
        assert_eq!(INVOICE_NO_RULES.first_match(text), Some("INV-1".to_string()));
    }

    #[test]
    fn test_first_match_none() {
        assert_eq!(INVOICE_NO_RULES.first_match("nothing to see"), None);
    }

    #[test]
    fn test_all_matches_scans_globally() {
        let text = "CGST: 100\nSGST: 50\nTax: 5";
        let matches = TAX_RULES.all_matches(text);
        assert_eq!(matches, ["5", "100", "50"]);
    }

    #[test]
    fn test_cgst_not_double_counted_by_generic_rule() {
        let matches = TAX_RULES.all_matches("CGST: 100");
        assert_eq!(matches, ["100"]);
    }
}
