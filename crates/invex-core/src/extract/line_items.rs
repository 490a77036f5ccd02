//! Line-item extraction via a lexical row scanner.

use regex::{CaptureMatches, Regex};

use crate::models::LineItem;

use super::amounts::parse_amount;
use super::normalize::NormalizedText;
use super::rules::LINE_ITEM_PATTERN;

/// Line-item parser.
///
/// A single repeating pattern is scanned over the whole text; every
/// non-overlapping match becomes one item, in match order. No
/// deduplication is performed even when the same textual row matches
/// twice, and `amount` is taken verbatim rather than re-derived from
/// quantity and price: conservative over-extraction is preferred to
/// dropping genuine items.
#[derive(Debug, Default)]
pub struct LineItemParser;

impl LineItemParser {
    pub fn new() -> Self {
        Self
    }

    /// Lazily scan the text for line-item rows.
    ///
    /// The scanner is finite and restartable: calling `scan` again
    /// yields a fresh pass over the same text.
    pub fn scan<'t>(&self, text: &'t NormalizedText) -> LineItemScanner<'t> {
        let pattern: &'static Regex = &LINE_ITEM_PATTERN;
        LineItemScanner {
            matches: pattern.captures_iter(text.text()),
        }
    }

    /// Collect every matched row into an ordered sequence.
    pub fn parse(&self, text: &NormalizedText) -> Vec<LineItem> {
        self.scan(text).collect()
    }
}

/// Lazy iterator over raw row matches, mapped into line items.
///
/// Rows whose numeric fields fail to parse after separator stripping
/// are skipped, never turned into errors.
pub struct LineItemScanner<'t> {
    matches: CaptureMatches<'static, 't>,
}

impl Iterator for LineItemScanner<'_> {
    type Item = LineItem;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.matches.by_ref() {
            let description = caps[1].trim().to_string();
            if description.is_empty() {
                continue;
            }

            let (Some(quantity), Some(unit_price), Some(amount)) = (
                parse_amount(&caps[2]),
                parse_amount(&caps[3]),
                parse_amount(&caps[4]),
            ) else {
                continue;
            };

            return Some(LineItem {
                description,
                quantity,
                unit_price,
                amount,
            });
        }
        None
    }
}
