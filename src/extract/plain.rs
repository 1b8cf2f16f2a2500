//! Plain-text uploads.

use crate::detect::TEXT_MIME_TYPE;
use crate::error::Result;

use super::TextExtractor;

/// Plain-text extractor.
///
/// Decodes UTF-8, replacing invalid sequences, and strips a leading
/// byte-order mark.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor {
    _private: (),
}

impl PlainTextExtractor {
    /// Create a new plain-text extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn mime_types(&self) -> &[&str] {
        &[TEXT_MIME_TYPE]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_kept_verbatim() {
        let extractor = PlainTextExtractor::new();
        let text = extractor.extract(b"JOHN DOE\n\n- Rust  \r\n").unwrap();
        assert_eq!(text, "JOHN DOE\n\n- Rust  \r\n");
    }

    #[test]
    fn test_bom_and_invalid_utf8() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.extract(b"\xEF\xBB\xBFSKILLS").unwrap(), "SKILLS");
        assert_eq!(extractor.extract(b"caf\xFF").unwrap(), "caf\u{FFFD}");
    }
}
