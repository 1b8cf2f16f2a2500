//! Text extraction from uploaded resumes.
//!
//! Extractors are registered per MIME type and dispatched through an
//! [`ExtractorRegistry`]. The registry enforces the upload size limit
//! before any extractor runs and rejects results without meaningful text.
//!
//! # Example
//!
//! ```no_run
//! use atsaudit::extract::{ExtractOptions, ExtractorRegistry};
//!
//! fn main() -> atsaudit::Result<()> {
//!     let registry = ExtractorRegistry::with_defaults();
//!     let bytes = std::fs::read("resume.pdf")?;
//!     let text = registry.extract(&bytes, "application/pdf", &ExtractOptions::default())?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;
mod plain;

pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;
pub use plain::PlainTextExtractor;

use crate::detect;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Maximum accepted upload size (2 MiB).
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Message returned for MIME types no extractor handles.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported format. Please use PDF, DOCX, or TXT.";

/// Options for text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Reject inputs larger than this many bytes
    pub max_bytes: usize,

    /// Fail with `EmptyText` when nothing but whitespace was extracted
    pub require_text: bool,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit in bytes.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Accept empty extraction results.
    pub fn allow_empty(mut self) -> Self {
        self.require_text = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            require_text: true,
        }
    }
}

/// Trait for upload text extractors.
///
/// Implement this trait to support another upload format.
pub trait TextExtractor: Send + Sync {
    /// MIME types handled by this extractor, lowercase.
    fn mime_types(&self) -> &[&str];

    /// Name of this extractor.
    fn name(&self) -> &str;

    /// Extract raw text from file content.
    fn extract(&self, bytes: &[u8]) -> Result<String>;

    /// Check if this extractor handles the given MIME type.
    fn supports_mime(&self, mime: &str) -> bool {
        let mime = normalize_mime(mime);
        self.mime_types().iter().any(|m| *m == mime)
    }
}

/// Registry mapping MIME types to extractors.
pub struct ExtractorRegistry {
    by_mime: HashMap<String, Arc<dyn TextExtractor>>,
    by_name: HashMap<String, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_mime: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, DOCX and plain-text extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfTextExtractor::new()));
        registry.register(Arc::new(DocxTextExtractor::new()));
        registry.register(Arc::new(PlainTextExtractor::new()));
        registry
    }

    /// Register an extractor for all its MIME types.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        for mime in extractor.mime_types() {
            self.by_mime.insert(normalize_mime(mime), extractor.clone());
        }
        self.by_name
            .insert(extractor.name().to_lowercase(), extractor);
    }

    /// Get an extractor by MIME type.
    pub fn get_by_mime(&self, mime: &str) -> Option<Arc<dyn TextExtractor>> {
        self.by_mime.get(&normalize_mime(mime)).cloned()
    }

    /// Get an extractor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextExtractor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a MIME type is supported.
    pub fn supports(&self, mime: &str) -> bool {
        self.by_mime.contains_key(&normalize_mime(mime))
    }

    /// Get all supported MIME types.
    pub fn supported_mime_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.by_mime.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Extract text from bytes of the given MIME type.
    pub fn extract(&self, bytes: &[u8], mime: &str, options: &ExtractOptions) -> Result<String> {
        check_size(bytes.len(), options)?;

        let extractor = self
            .get_by_mime(mime)
            .ok_or_else(|| Error::UnsupportedFormat(UNSUPPORTED_FORMAT_MESSAGE.to_string()))?;

        let text = extractor.extract(bytes)?;
        log::debug!(
            "Extracted {} chars from {} bytes with '{}' extractor",
            text.chars().count(),
            bytes.len(),
            extractor.name()
        );

        if options.require_text && text.trim().is_empty() {
            return Err(Error::EmptyText);
        }

        Ok(text)
    }

    /// Extract text from a file, guessing its MIME type from the extension
    /// or, failing that, its content.
    pub fn extract_file(&self, path: &Path, options: &ExtractOptions) -> Result<String> {
        let size = std::fs::metadata(path)?.len();
        check_size(usize::try_from(size).unwrap_or(usize::MAX), options)?;

        let bytes = std::fs::read(path)?;
        let mime = detect::detect_mime(path, &bytes)
            .ok_or_else(|| Error::UnsupportedFormat(UNSUPPORTED_FORMAT_MESSAGE.to_string()))?;

        self.extract(&bytes, mime, options)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_registry() -> &'static ExtractorRegistry {
    static REGISTRY: OnceLock<ExtractorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ExtractorRegistry::with_defaults)
}

/// Extract text from an upload with the default extractors and limits.
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<String> {
    default_registry().extract(bytes, mime, &ExtractOptions::default())
}

/// Extract text from an upload with explicit options.
pub fn extract_text_with(bytes: &[u8], mime: &str, options: &ExtractOptions) -> Result<String> {
    default_registry().extract(bytes, mime, options)
}

/// Extract text from a file on disk with the default extractors and limits.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<String> {
    default_registry().extract_file(path.as_ref(), &ExtractOptions::default())
}

fn check_size(size: usize, options: &ExtractOptions) -> Result<()> {
    if size > options.max_bytes {
        return Err(Error::FileTooLarge {
            size,
            limit: options.max_bytes,
        });
    }
    Ok(())
}

/// Lowercase a MIME type and strip parameters (`text/plain; charset=utf-8`).
fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports("application/pdf"));
        assert!(registry.supports("TEXT/PLAIN; charset=utf-8"));
        assert!(registry.supports(detect::TEXT_MIME_TYPE));
        assert!(!registry.supports("image/png"));
        assert_eq!(registry.supported_mime_types().len(), 3);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(registry.get_by_name("DOCX").map(|e| e.name().to_string()), Some("docx".to_string()));
        assert!(registry.get_by_name("rtf").is_none());
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = extract_text(b"GIF89a", "image/gif").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert_eq!(err.to_string(), "Unsupported format. Please use PDF, DOCX, or TXT.");
    }

    #[test]
    fn test_size_limit_checked_first() {
        let big = vec![b'a'; MAX_UPLOAD_BYTES + 1];
        let err = extract_text(&big, "image/gif").unwrap_err();
        assert!(matches!(
            err,
            Error::FileTooLarge { size, limit } if size == MAX_UPLOAD_BYTES + 1 && limit == MAX_UPLOAD_BYTES
        ));

        // exactly at the limit is accepted
        let at_limit = vec![b'a'; MAX_UPLOAD_BYTES];
        assert!(extract_text(&at_limit, "text/plain").is_ok());
    }

    #[test]
    fn test_whitespace_only_is_empty_text() {
        let err = extract_text(b"  \n\t \n", "text/plain").unwrap_err();
        assert!(matches!(err, Error::EmptyText));

        let options = ExtractOptions::new().allow_empty();
        assert_eq!(extract_text_with(b"  ", "text/plain", &options).unwrap(), "  ");
    }

    #[test]
    fn test_custom_limit() {
        let options = ExtractOptions::new().with_max_bytes(4);
        assert!(matches!(
            extract_text_with(b"hello", "text/plain", &options),
            Err(Error::FileTooLarge { .. })
        ));
    }
}
