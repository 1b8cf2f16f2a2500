//! Rendering module: one classified document, three independent outputs.
//!
//! Every renderer takes the same `&Document` and only maps block kinds to
//! its own presentation; none of them looks at the raw text again.

pub mod display;
pub mod docx;
pub mod metrics;
mod options;
pub mod pdf;
mod result;

pub use display::{render_for_display, render_for_display_with, to_html, DisplayNode};
pub use docx::{docx_paragraphs, encode_docx, encode_docx_with, DocxParagraph};
pub use metrics::{wrap_text, StandardFont};
pub use options::{DisplayOptions, DisplayStyle, DocxOptions, PdfOptions, Spacing, MM_TO_PT};
pub use pdf::{encode_pdf, encode_pdf_with, layout_pdf, PdfLayout, PlacedLine};
pub use result::{
    ExportArtifact, ExportStats, DOCX_FILE_NAME, DOCX_MIME_TYPE, PDF_FILE_NAME, PDF_MIME_TYPE,
};
