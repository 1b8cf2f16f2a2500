//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Millimetres to PDF points.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Options for the paginated (PDF) encoder.
///
/// Geometry is expressed in millimetres; font sizes in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Page width in millimetres
    pub page_width_mm: f32,

    /// Page height in millimetres
    pub page_height_mm: f32,

    /// Margin applied on all four sides
    pub margin_mm: f32,

    /// Cursor advance for a blank line
    pub blank_advance_mm: f32,

    /// Cursor advance after a heading
    pub heading_advance_mm: f32,

    /// Cursor advance per wrapped body line
    pub body_advance_mm: f32,

    /// Heading font size in points (Helvetica-Bold)
    pub heading_font_size: f32,

    /// Body font size in points (Helvetica)
    pub body_font_size: f32,

    /// Document title written to the Info dictionary
    pub title: Option<String>,

    /// Compress page content streams
    pub compress: bool,
}

impl PdfOptions {
    /// Create new PDF options with defaults (A4, 20 mm margins).
    pub fn new() -> Self {
        Self::default()
    }

    /// US Letter page (215.9 × 279.4 mm), other settings unchanged.
    pub fn letter(mut self) -> Self {
        self.page_width_mm = 215.9;
        self.page_height_mm = 279.4;
        self
    }

    /// Set the page size in millimetres.
    pub fn with_page_size(mut self, width_mm: f32, height_mm: f32) -> Self {
        self.page_width_mm = width_mm;
        self.page_height_mm = height_mm;
        self
    }

    /// Set the margin in millimetres.
    pub fn with_margin(mut self, margin_mm: f32) -> Self {
        self.margin_mm = margin_mm.max(0.0);
        self
    }

    /// Set the font sizes in points.
    pub fn with_font_sizes(mut self, heading: f32, body: f32) -> Self {
        self.heading_font_size = heading;
        self.body_font_size = body;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Width available for text, in millimetres.
    pub fn usable_width_mm(&self) -> f32 {
        (self.page_width_mm - 2.0 * self.margin_mm).max(0.0)
    }

    /// Lowest baseline (from the page top) a line may be drawn at.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            blank_advance_mm: 4.0,
            heading_advance_mm: 8.0,
            body_advance_mm: 5.0,
            heading_font_size: 13.0,
            body_font_size: 10.0,
            title: None,
            compress: true,
        }
    }
}

/// Paragraph spacing in twentieths of a point (twips).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Space before the paragraph
    pub before: u32,
    /// Space after the paragraph
    pub after: u32,
}

impl Spacing {
    /// Create a spacing pair.
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }
}

/// Options for the word-processor (DOCX) encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxOptions {
    /// Heading run size in half-points
    pub heading_size: u32,

    /// Body run size in half-points
    pub body_size: u32,

    /// Spacing around heading paragraphs
    pub heading_spacing: Spacing,

    /// Spacing around body paragraphs
    pub body_spacing: Spacing,

    /// Font applied to every run (None = application default)
    pub font: Option<String>,

    /// Document title written to the core properties
    pub title: Option<String>,
}

impl DocxOptions {
    /// Create new DOCX options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set run sizes in half-points.
    pub fn with_sizes(mut self, heading: u32, body: u32) -> Self {
        self.heading_size = heading;
        self.body_size = body;
        self
    }

    /// Set heading paragraph spacing.
    pub fn with_heading_spacing(mut self, spacing: Spacing) -> Self {
        self.heading_spacing = spacing;
        self
    }

    /// Set body paragraph spacing.
    pub fn with_body_spacing(mut self, spacing: Spacing) -> Self {
        self.body_spacing = spacing;
        self
    }

    /// Set the run font.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            heading_size: 24,
            body_size: 22,
            heading_spacing: Spacing::new(200, 100),
            body_spacing: Spacing::new(60, 60),
            font: None,
            title: None,
        }
    }
}

/// Visual style of one display node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayStyle {
    /// Bold weight
    pub bold: bool,
    /// Font size in CSS pixels
    pub font_size_px: f32,
    /// Letter spacing in em
    pub letter_spacing_em: f32,
    /// Space above in CSS pixels
    pub margin_top_px: f32,
    /// Space below in CSS pixels
    pub margin_bottom_px: f32,
}

impl DisplayStyle {
    /// Default heading style: bold, larger, tracked.
    pub const HEADING: DisplayStyle = DisplayStyle {
        bold: true,
        font_size_px: 16.0,
        letter_spacing_em: 0.025,
        margin_top_px: 20.0,
        margin_bottom_px: 8.0,
    };

    /// Default body style.
    pub const BODY: DisplayStyle = DisplayStyle {
        bold: false,
        font_size_px: 14.0,
        letter_spacing_em: 0.0,
        margin_top_px: 0.0,
        margin_bottom_px: 0.0,
    };
}

/// Options for the screen renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Height of a blank-line spacer in CSS pixels
    pub spacer_height_px: f32,

    /// Style applied to headings
    pub heading_style: DisplayStyle,

    /// Style applied to body lines
    pub body_style: DisplayStyle,
}

impl DisplayOptions {
    /// Create new display options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spacer height.
    pub fn with_spacer_height(mut self, px: f32) -> Self {
        self.spacer_height_px = px.max(0.0);
        self
    }

    /// Set the heading style.
    pub fn with_heading_style(mut self, style: DisplayStyle) -> Self {
        self.heading_style = style;
        self
    }

    /// Set the body style.
    pub fn with_body_style(mut self, style: DisplayStyle) -> Self {
        self.body_style = style;
        self
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            spacer_height_px: 12.0,
            heading_style: DisplayStyle::HEADING,
            body_style: DisplayStyle::BODY,
        }
    }
}
