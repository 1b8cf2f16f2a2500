//! Word-processor document (DOCX) encoding.
//!
//! Each block becomes exactly one paragraph with a single run. Pagination is
//! left to the consuming application; the encoder only emits the flat
//! paragraph sequence and packs it into an OOXML container.

use std::io::{Cursor, Write};

use chrono::Utc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::{BlockKind, Document};

use super::options::{DocxOptions, Spacing};

/// Page width of the single section, in twips (A4).
const PAGE_WIDTH_TWIPS: u32 = 11906;
/// Page height of the single section, in twips (A4).
const PAGE_HEIGHT_TWIPS: u32 = 16838;
/// Page margin on every side, in twips (one inch).
const PAGE_MARGIN_TWIPS: u32 = 1440;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>atsaudit</Application></Properties>"#;

/// One paragraph of the word-processor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxParagraph {
    /// Run text
    pub text: String,

    /// Bold run
    pub bold: bool,

    /// Run size in half-points
    pub size: u32,

    /// Paragraph spacing (None for blank separators)
    pub spacing: Option<Spacing>,

    /// Index of the source block in the document
    pub block_index: usize,
}

/// Map blocks to paragraphs, one per block.
pub fn docx_paragraphs(doc: &Document, options: &DocxOptions) -> Vec<DocxParagraph> {
    doc.iter()
        .enumerate()
        .map(|(block_index, block)| match block.kind {
            BlockKind::Blank => DocxParagraph {
                text: " ".to_string(),
                bold: false,
                size: options.body_size,
                spacing: None,
                block_index,
            },
            BlockKind::Heading => DocxParagraph {
                text: block.text.clone(),
                bold: true,
                size: options.heading_size,
                spacing: Some(options.heading_spacing),
                block_index,
            },
            BlockKind::Body => DocxParagraph {
                text: block.text.clone(),
                bold: false,
                size: options.body_size,
                spacing: Some(options.body_spacing),
                block_index,
            },
        })
        .collect()
}

/// Encode a document as DOCX with default options.
pub fn encode_docx(doc: &Document) -> Result<Vec<u8>> {
    encode_docx_with(doc, &DocxOptions::default())
}

/// Encode a document as DOCX.
pub fn encode_docx_with(doc: &Document, options: &DocxOptions) -> Result<Vec<u8>> {
    let paragraphs = docx_paragraphs(doc, options);
    let document_xml = document_xml(&paragraphs, options);
    let styles_xml = styles_xml(options);
    let core_xml = core_xml(options);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/document.xml", &document_xml),
        ("word/styles.xml", &styles_xml),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("docProps/core.xml", &core_xml),
        ("docProps/app.xml", APP_XML),
    ];

    for (name, body) in parts {
        writer.start_file(name, file_options)?;
        writer.write_all(body.as_bytes())?;
    }

    let bytes = writer.finish()?.into_inner();

    log::debug!(
        "Encoded DOCX: {} paragraphs, {} bytes",
        paragraphs.len(),
        bytes.len()
    );

    Ok(bytes)
}

/// Build `word/document.xml` for a paragraph sequence.
pub fn document_xml(paragraphs: &[DocxParagraph], options: &DocxOptions) -> String {
    let mut output = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for para in paragraphs {
        render_paragraph(&mut output, para, options);
    }

    output.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="{w}" w:h="{h}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
        w = PAGE_WIDTH_TWIPS,
        h = PAGE_HEIGHT_TWIPS,
        m = PAGE_MARGIN_TWIPS,
    ));
    output.push_str("</w:body></w:document>");
    output
}

fn render_paragraph(output: &mut String, para: &DocxParagraph, options: &DocxOptions) {
    output.push_str("<w:p>");

    if let Some(spacing) = para.spacing {
        output.push_str(&format!(
            r#"<w:pPr><w:spacing w:before="{}" w:after="{}"/></w:pPr>"#,
            spacing.before, spacing.after
        ));
    }

    output.push_str("<w:r><w:rPr>");
    if let Some(ref font) = options.font {
        let font = escape_xml(font);
        output.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            font
        ));
    }
    if para.bold {
        output.push_str("<w:b/><w:bCs/>");
    }
    output.push_str(&format!(
        r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
        para.size
    ));
    output.push_str("</w:rPr>");

    output.push_str(r#"<w:t xml:space="preserve">"#);
    output.push_str(&escape_xml(&para.text));
    output.push_str("</w:t></w:r></w:p>");
}

fn styles_xml(options: &DocxOptions) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="{0}"/><w:szCs w:val="{0}"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#,
        options.body_size
    )
}

fn core_xml(options: &DocxOptions) -> String {
    let title = options
        .title
        .as_deref()
        .map(|t| format!("<dc:title>{}</dc:title>", escape_xml(t)))
        .unwrap_or_default();
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}<dc:creator>atsaudit</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created></cp:coreProperties>"#,
        title, created
    )
}

/// Escape text for XML content and attributes.
///
/// Carriage returns and the C0 controls XML 1.0 cannot carry are dropped.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' => out.push(c),
            c if c.is_control() && (c as u32) < 0x20 => {}
            _ => out.push(c),
        }
    }
    out
}
