//! # atsaudit
//!
//! Resume auditing and export library for Rust.
//!
//! A rewritten plain-text resume is classified line by line into headings,
//! body lines and blank separators. That one block sequence then feeds three
//! renderers: styled display nodes for the screen, a paginated PDF and a
//! DOCX word-processor document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use atsaudit::ResumeExport;
//!
//! fn main() -> atsaudit::Result<()> {
//!     let text = "JOHN DOE\n\nPROFESSIONAL SUMMARY\nExperienced engineer.\n\nSKILLS\n- Go\n- Rust";
//!
//!     let session = ResumeExport::new().with_title("John Doe").build(text);
//!     let pdf = session.pdf()?;
//!     std::fs::write(&pdf.file_name, &pdf.bytes)?;
//!
//!     let docx = session.docx()?;
//!     std::fs::write(&docx.file_name, &docx.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One classification, three outputs**: display nodes, PDF, DOCX
//! - **Deterministic pagination**: inspectable PDF layout before encoding
//! - **Upload extraction**: PDF, DOCX and plain-text resumes
//! - **Audit orchestration**: pluggable inference provider with a usage limit

pub mod audit;
pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use audit::{
    AuditRequest, Auditor, CancellationToken, FileUsage, InferenceProvider, MemoryUsage,
    ReplayProvider, UsageCounter, UsageGate, DEFAULT_USAGE_LIMIT,
};
pub use classify::{classify, classify_with, HeadingRegistry};
pub use error::{Error, Result};
pub use extract::{extract_file, extract_text, ExtractOptions, ExtractorRegistry, MAX_UPLOAD_BYTES};
pub use model::{build_document, AnalysisResult, Block, BlockKind, Document};
pub use render::{
    encode_docx, encode_pdf, render_for_display, DisplayNode, DisplayOptions, DocxOptions,
    ExportArtifact, ExportStats, PdfLayout, PdfOptions,
};

/// Builder for exporting a resume to every output format.
///
/// # Example
///
/// ```
/// use atsaudit::{PdfOptions, ResumeExport};
///
/// let session = ResumeExport::new()
///     .with_pdf_options(PdfOptions::new().letter())
///     .build("SKILLS\n- Rust");
///
/// assert_eq!(session.document().heading_indices(), vec![0]);
/// assert_eq!(session.stats().page_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResumeExport {
    registry: Option<HeadingRegistry>,
    pdf_options: PdfOptions,
    docx_options: DocxOptions,
    display_options: DisplayOptions,
}

impl ResumeExport {
    /// Create a new export builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify headings against a custom registry.
    pub fn with_registry(mut self, registry: HeadingRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set PDF options.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    /// Set DOCX options.
    pub fn with_docx_options(mut self, options: DocxOptions) -> Self {
        self.docx_options = options;
        self
    }

    /// Set display options.
    pub fn with_display_options(mut self, options: DisplayOptions) -> Self {
        self.display_options = options;
        self
    }

    /// Set the document title of both file exports.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.pdf_options = self.pdf_options.with_title(title.clone());
        self.docx_options = self.docx_options.with_title(title);
        self
    }

    /// Classify resume text once and return a session over the result.
    pub fn build(self, text: &str) -> ExportSession {
        let document = match self.registry {
            Some(ref registry) => Document::build_with(text, registry),
            None => Document::build(text),
        };

        ExportSession {
            document,
            pdf_options: self.pdf_options,
            docx_options: self.docx_options,
            display_options: self.display_options,
        }
    }

    /// Build a session over the rewritten resume of an audit.
    pub fn from_analysis(self, analysis: &AnalysisResult) -> ExportSession {
        self.build(analysis.resume_text())
    }
}

/// One classified resume, ready to be rendered in any format.
#[derive(Debug, Clone)]
pub struct ExportSession {
    document: Document,
    pdf_options: PdfOptions,
    docx_options: DocxOptions,
    display_options: DisplayOptions,
}

impl ExportSession {
    /// Get the classified document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Render display nodes.
    pub fn display(&self) -> Vec<DisplayNode> {
        render::render_for_display_with(&self.document, &self.display_options)
    }

    /// Render an HTML fragment.
    pub fn html(&self) -> String {
        render::to_html(&self.display())
    }

    /// Lay out the document on PDF pages without encoding it.
    pub fn layout(&self) -> PdfLayout {
        render::layout_pdf(&self.document, &self.pdf_options)
    }

    /// Encode the PDF export.
    pub fn pdf(&self) -> Result<ExportArtifact> {
        let bytes = render::encode_pdf_with(&self.document, &self.pdf_options)?;
        Ok(ExportArtifact::pdf(bytes))
    }

    /// Encode the DOCX export.
    pub fn docx(&self) -> Result<ExportArtifact> {
        let bytes = render::encode_docx_with(&self.document, &self.docx_options)?;
        Ok(ExportArtifact::docx(bytes))
    }

    /// Encode both file exports.
    pub fn artifacts(&self) -> Result<Vec<ExportArtifact>> {
        Ok(vec![self.pdf()?, self.docx()?])
    }

    /// Block counts and PDF page count.
    pub fn stats(&self) -> ExportStats {
        ExportStats::from_document(&self.document, self.layout().page_count as u32)
    }
}
