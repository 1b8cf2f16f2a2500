//! Paginated document (PDF) encoding.
//!
//! Encoding happens in two steps. [`layout_pdf`] walks the block sequence
//! with a vertical cursor and decides where every visual line lands,
//! including wrapping and page breaks. [`encode_pdf_with`] then serializes
//! that layout with `lopdf`. The layout step is pure, so pagination can be
//! inspected without decoding PDF bytes.
//!
//! Page breaks are checked before each heading and before each wrapped body
//! line: when the cursor has moved past the bottom margin a new page is
//! started and the cursor returns to the top margin. Blank blocks only move
//! the cursor.

use std::io::Write;

use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream, StringFormat};
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{BlockKind, Document};

use super::metrics::{wrap_text, StandardFont};
use super::options::{PdfOptions, MM_TO_PT};

/// Producer string written to the PDF Info dictionary.
pub const PDF_PRODUCER: &str = concat!("atsaudit ", env!("CARGO_PKG_VERSION"));

/// One visual line placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// 0-indexed page number
    pub page: usize,

    /// Left edge in millimetres from the page's left side
    pub x_mm: f32,

    /// Baseline in millimetres from the page top
    pub y_mm: f32,

    /// Font face
    pub font: StandardFont,

    /// Font size in points
    pub size_pt: f32,

    /// Text drawn on this line
    pub text: String,

    /// Index of the source block in the document
    pub block_index: usize,
}

/// Result of laying out a document on fixed-size pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    /// Number of pages (at least one)
    pub page_count: usize,

    /// Every drawn line, in drawing order
    pub lines: Vec<PlacedLine>,
}

impl PdfLayout {
    /// Lines drawn on one page.
    pub fn lines_on_page(&self, page: usize) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |l| l.page == page)
    }

    /// Source block indices drawn in bold, in order and without repeats.
    pub fn bold_block_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = Vec::new();
        for line in self.lines.iter().filter(|l| l.font.is_bold()) {
            if indices.last() != Some(&line.block_index) {
                indices.push(line.block_index);
            }
        }
        indices
    }
}

/// Lay out a document on pages.
pub fn layout_pdf(doc: &Document, options: &PdfOptions) -> PdfLayout {
    let bottom = options.bottom_limit_mm();
    let max_width_pt = options.usable_width_mm() * MM_TO_PT;

    let mut page = 0usize;
    let mut y = options.margin_mm;
    let mut lines = Vec::new();

    let ensure_room = |page: &mut usize, y: &mut f32, index: usize| {
        if *y > bottom {
            *page += 1;
            *y = options.margin_mm;
            log::debug!("Page break before block {} (page {})", index, *page + 1);
        }
    };

    for (index, block) in doc.iter().enumerate() {
        match block.kind {
            BlockKind::Blank => {
                y += options.blank_advance_mm;
            }
            BlockKind::Heading => {
                ensure_room(&mut page, &mut y, index);
                lines.push(PlacedLine {
                    page,
                    x_mm: options.margin_mm,
                    y_mm: y,
                    font: StandardFont::HelveticaBold,
                    size_pt: options.heading_font_size,
                    text: block.text.clone(),
                    block_index: index,
                });
                y += options.heading_advance_mm;
            }
            BlockKind::Body => {
                let wrapped = wrap_text(
                    &block.text,
                    StandardFont::Helvetica,
                    options.body_font_size,
                    max_width_pt,
                );
                for text in wrapped {
                    ensure_room(&mut page, &mut y, index);
                    lines.push(PlacedLine {
                        page,
                        x_mm: options.margin_mm,
                        y_mm: y,
                        font: StandardFont::Helvetica,
                        size_pt: options.body_font_size,
                        text,
                        block_index: index,
                    });
                    y += options.body_advance_mm;
                }
            }
        }
    }

    PdfLayout {
        page_count: page + 1,
        lines,
    }
}

/// Encode a document as PDF with default options.
pub fn encode_pdf(doc: &Document) -> Result<Vec<u8>> {
    encode_pdf_with(doc, &PdfOptions::default())
}

/// Encode a document as PDF.
pub fn encode_pdf_with(doc: &Document, options: &PdfOptions) -> Result<Vec<u8>> {
    let layout = layout_pdf(doc, options);
    write_layout(&layout, options)
}

/// Serialize a computed layout.
pub fn write_layout(layout: &PdfLayout, options: &PdfOptions) -> Result<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font_dictionary(StandardFont::Helvetica));
    let bold_id = pdf.add_object(font_dictionary(StandardFont::HelveticaBold));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            StandardFont::Helvetica.resource_name() => regular_id,
            StandardFont::HelveticaBold.resource_name() => bold_id,
        },
    });

    let page_height_pt = options.page_height_mm * MM_TO_PT;
    let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count);

    for page in 0..layout.page_count {
        let operations = page_operations(layout.lines_on_page(page), page_height_pt);
        let content = Content { operations }.encode()?;
        let stream = if options.compress {
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, deflate(&content)?)
        } else {
            Stream::new(dictionary! {}, content)
        };
        let content_id = pdf.add_object(stream);
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (options.page_width_mm * MM_TO_PT).into(),
        page_height_pt.into(),
    ];
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => layout.page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal(PDF_PRODUCER),
        "CreationDate" => Object::string_literal(
            Utc::now().format("D:%Y%m%d%H%M%S+00'00'").to_string()
        ),
    };
    if let Some(ref title) = options.title {
        info.set("Title", Object::String(encode_win_ansi(title), StringFormat::Literal));
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;

    log::debug!(
        "Encoded PDF: {} pages, {} lines, {} bytes",
        layout.page_count,
        layout.lines.len(),
        bytes.len()
    );

    Ok(bytes)
}

fn font_dictionary(font: StandardFont) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_name(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations<'a>(
    lines: impl Iterator<Item = &'a PlacedLine>,
    page_height_pt: f32,
) -> Vec<Operation> {
    let mut operations = Vec::new();
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.font.resource_name().into(), line.size_pt.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                (line.x_mm * MM_TO_PT).into(),
                (page_height_pt - line.y_mm * MM_TO_PT).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Encode text for a WinAnsi-encoded standard font.
///
/// Characters without a WinAnsi code are reduced to their base letter when
/// one exists (`ł` stays `?`, `ő` becomes `o`), tabs become spaces and other
/// control characters are dropped.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        if let Some(byte) = win_ansi_byte(c) {
            out.push(byte);
        } else if c == '\t' {
            out.push(b' ');
        } else if c.is_control() {
            continue;
        } else {
            let base = std::iter::once(c).nfd().next().and_then(win_ansi_byte);
            out.push(base.unwrap_or(b'?'));
        }
    }
    out
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}
