//! Export artifacts and statistics.

use crate::model::{BlockKind, Document};
use serde::{Deserialize, Serialize};

/// Default file name of the PDF export.
pub const PDF_FILE_NAME: &str = "ATS_Audited_Resume.pdf";

/// Default file name of the DOCX export.
pub const DOCX_FILE_NAME: &str = "ATS_Audited_Resume.docx";

/// MIME type of PDF exports.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// MIME type of DOCX exports.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// An encoded document ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name
    pub file_name: String,

    /// MIME type of the bytes
    pub mime_type: &'static str,

    /// Encoded file content
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Wrap PDF bytes with the default name and MIME type.
    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            file_name: PDF_FILE_NAME.to_string(),
            mime_type: PDF_MIME_TYPE,
            bytes,
        }
    }

    /// Wrap DOCX bytes with the default name and MIME type.
    pub fn docx(bytes: Vec<u8>) -> Self {
        Self {
            file_name: DOCX_FILE_NAME.to_string(),
            mime_type: DOCX_MIME_TYPE,
            bytes,
        }
    }

    /// Override the file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the artifact has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Statistics about an exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Number of PDF pages
    pub page_count: u32,

    /// Number of heading blocks
    pub heading_count: u32,

    /// Number of body blocks
    pub body_count: u32,

    /// Number of blank blocks
    pub blank_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExportStats {
    /// Collect statistics for a document laid out on `page_count` pages.
    pub fn from_document(doc: &Document, page_count: u32) -> Self {
        let mut stats = Self {
            page_count,
            ..Default::default()
        };

        for block in doc {
            match block.kind {
                BlockKind::Heading => stats.heading_count += 1,
                BlockKind::Body => stats.body_count += 1,
                BlockKind::Blank => stats.blank_count += 1,
            }
            stats.count_text(&block.text);
        }

        stats
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> u32 {
        self.heading_count + self.body_count + self.blank_count
    }

    fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
