//! PDF uploads, read with `pdf-extract`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::detect;
use crate::error::{Error, Result};
use crate::render::PDF_MIME_TYPE;

use super::TextExtractor;

/// PDF text extractor.
///
/// Pages are separated by a blank line.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor {
    _private: (),
}

impl PdfTextExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn mime_types(&self) -> &[&str] {
        &[PDF_MIME_TYPE]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let version = detect::pdf_version(bytes)
            .ok_or_else(|| Error::Extract("Not a PDF file".to_string()))?;
        log::debug!("Extracting text from PDF {}", version);

        // pdf-extract panics on some malformed content streams
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| Error::Extract("PDF content could not be decoded".to_string()))??;

        Ok(text.replace('\x0C', "\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf() {
        let err = PdfTextExtractor::new().extract(b"JOHN DOE").unwrap_err();
        assert!(matches!(err, Error::Extract(_)));
    }
}
