//! Upload format detection.
//!
//! Uploads are dispatched by MIME type. When the caller has no MIME type
//! (CLI paths, pasted bytes) it is guessed from the file extension first
//! and the leading bytes second.

use crate::render::{DOCX_MIME_TYPE, PDF_MIME_TYPE};
use std::path::Path;

/// MIME type of plain-text uploads.
pub const TEXT_MIME_TYPE: &str = "text/plain";

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Local file header of a zip container.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Map a file extension (without the dot) to a MIME type.
///
/// # Example
/// ```
/// use atsaudit::detect::mime_from_extension;
///
/// assert_eq!(mime_from_extension("PDF"), Some("application/pdf"));
/// assert_eq!(mime_from_extension("png"), None);
/// ```
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some(PDF_MIME_TYPE),
        "docx" => Some(DOCX_MIME_TYPE),
        "txt" | "text" => Some(TEXT_MIME_TYPE),
        _ => None,
    }
}

/// Map a path's extension to a MIME type.
pub fn mime_from_path<P: AsRef<Path>>(path: P) -> Option<&'static str> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_from_extension)
}

/// Guess a MIME type from the leading bytes.
///
/// Recognises PDF by its header, DOCX as a zip container with `word/`
/// entries, and anything that is valid UTF-8 as plain text.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(PDF_MAGIC) {
        return Some(PDF_MIME_TYPE);
    }

    if data.starts_with(ZIP_MAGIC) {
        return contains(data, b"word/").then_some(DOCX_MIME_TYPE);
    }

    std::str::from_utf8(data).ok().map(|_| TEXT_MIME_TYPE)
}

/// Guess a MIME type from a path and its content, extension first.
pub fn detect_mime<P: AsRef<Path>>(path: P, data: &[u8]) -> Option<&'static str> {
    mime_from_path(path).or_else(|| sniff_mime(data))
}

/// Read the version from a PDF header (e.g. "1.7" from "%PDF-1.7").
pub fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    let version = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let valid = version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit();
    valid.then(|| String::from_utf8_lossy(version).to_string())
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_some()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path("resume.docx"), Some(DOCX_MIME_TYPE));
        assert_eq!(mime_from_path("notes.TXT"), Some(TEXT_MIME_TYPE));
        assert_eq!(mime_from_path("resume"), None);
        assert_eq!(mime_from_path("photo.jpg"), None);
    }

    #[test]
    fn test_sniff_pdf() {
        assert_eq!(sniff_mime(b"%PDF-1.7\n%..."), Some(PDF_MIME_TYPE));
    }

    #[test]
    fn test_sniff_zip_requires_word_entries() {
        let mut docx = ZIP_MAGIC.to_vec();
        docx.extend_from_slice(b"\x14\x00\x00\x00word/document.xml");
        assert_eq!(sniff_mime(&docx), Some(DOCX_MIME_TYPE));

        let mut other = ZIP_MAGIC.to_vec();
        other.extend_from_slice(b"\x14\x00\x00\x00xl/workbook.xml");
        assert_eq!(sniff_mime(&other), None);
    }

    #[test]
    fn test_sniff_text_and_binary() {
        assert_eq!(sniff_mime("JOHN DOE\nSKILLS".as_bytes()), Some(TEXT_MIME_TYPE));
        assert_eq!(sniff_mime(&[0xFF, 0xFE, 0x00, 0x80]), None);
    }

    #[test]
    fn test_detect_prefers_extension() {
        assert_eq!(detect_mime("cv.txt", b"%PDF-1.4"), Some(TEXT_MIME_TYPE));
        assert_eq!(detect_mime("cv", b"%PDF-1.4"), Some(PDF_MIME_TYPE));
    }

    #[test]
    fn test_pdf_version() {
        assert_eq!(pdf_version(b"%PDF-1.5\n"), Some("1.5".to_string()));
        assert_eq!(pdf_version(b"%PDF-"), None);
        assert_eq!(pdf_version(b"%PDF-x.y"), None);
        assert!(!is_pdf_bytes(b"<!DOCTYPE html>"));
    }
}
