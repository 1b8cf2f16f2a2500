//! Integration tests for DOCX export, verified by reading the zip back.

use std::io::{Cursor, Read};

use atsaudit::render::{encode_docx, encode_docx_with, DocxOptions, Spacing};
use atsaudit::Document;

const SAMPLE: &str = "JOHN DOE\n\nPROFESSIONAL SUMMARY\nExperienced engineer.\n\nSKILLS\n- Go\n- Rust";

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

/// Split `word/document.xml` into paragraph elements.
fn paragraphs(xml: &str) -> Vec<&str> {
    xml.split("<w:p>").skip(1).collect()
}

#[test]
fn test_package_parts() {
    let bytes = encode_docx(&Document::build(SAMPLE)).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/_rels/document.xml.rels",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(names.contains(&part), "missing {}", part);
    }

    let content_types = read_part(&bytes, "[Content_Types].xml");
    assert!(content_types.contains("wordprocessingml.document.main+xml"));
}

#[test]
fn test_one_paragraph_per_block() {
    let doc = Document::build(SAMPLE);
    let xml = read_part(&encode_docx(&doc).unwrap(), "word/document.xml");
    let paras = paragraphs(&xml);

    assert_eq!(paras.len(), doc.len());

    let bold: Vec<usize> = paras
        .iter()
        .enumerate()
        .filter(|(_, p)| p.contains("<w:b/>"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(bold, doc.heading_indices());
}

#[test]
fn test_paragraph_formatting() {
    let doc = Document::build("SKILLS\n\n- Rust");
    let xml = read_part(&encode_docx(&doc).unwrap(), "word/document.xml");
    let paras = paragraphs(&xml);

    assert!(paras[0].contains(r#"<w:spacing w:before="200" w:after="100"/>"#));
    assert!(paras[0].contains(r#"<w:sz w:val="24"/>"#));
    assert!(paras[0].contains(">SKILLS</w:t>"));

    assert!(!paras[1].contains("<w:spacing"));
    assert!(paras[1].contains(r#"<w:t xml:space="preserve"> </w:t>"#));

    assert!(paras[2].contains(r#"<w:spacing w:before="60" w:after="60"/>"#));
    assert!(paras[2].contains(r#"<w:sz w:val="22"/>"#));
    assert!(!paras[2].contains("<w:b/>"));
    assert!(paras[2].contains(">- Rust</w:t>"));
}

#[test]
fn test_custom_options() {
    let options = DocxOptions::new()
        .with_sizes(28, 20)
        .with_heading_spacing(Spacing::new(240, 120))
        .with_title("John & Jane");
    let bytes = encode_docx_with(&Document::build("SKILLS"), &options).unwrap();

    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"<w:sz w:val="28"/>"#));
    assert!(xml.contains(r#"w:before="240" w:after="120""#));

    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>John &amp; Jane</dc:title>"));
}

#[test]
fn test_docx_text_roundtrips_through_extractor() {
    let doc = Document::build(SAMPLE);
    let bytes = encode_docx(&doc).unwrap();
    let text = atsaudit::extract_text(&bytes, atsaudit::render::DOCX_MIME_TYPE).unwrap();

    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), doc.len());
    assert_eq!(lines[0], "JOHN DOE");
    assert_eq!(lines[1], " ");
    assert_eq!(lines[7], "- Rust");

    // re-classifying the extracted text yields the same structure
    assert_eq!(Document::build(&text).heading_indices(), doc.heading_indices());
}
