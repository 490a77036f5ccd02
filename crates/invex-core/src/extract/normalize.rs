//! Text normalization for recognized invoice text.

/// Recognized text in its working form: the whole text for pattern
/// scanning plus the non-empty trimmed lines for positional fallbacks.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    text: String,
    lines: Vec<String>,
}

impl NormalizedText {
    /// Normalize raw recognized text.
    pub fn new(raw: &str) -> Self {
        let lines = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            text: raw.to_string(),
            lines,
        }
    }

    /// The whole text, as recognized.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty trimmed lines, in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First non-empty line, used as the vendor-name fallback.
    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }
}
