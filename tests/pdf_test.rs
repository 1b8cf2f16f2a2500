//! Integration tests for PDF export, verified by re-parsing with lopdf.

use atsaudit::render::{encode_pdf, encode_pdf_with, layout_pdf, PdfOptions, StandardFont};
use atsaudit::Document;
use lopdf::content::Content;
use lopdf::Object;

const SAMPLE: &str = "JOHN DOE\n\nPROFESSIONAL SUMMARY\nExperienced engineer.\n\nSKILLS\n- Go\n- Rust";

/// Text drawn on one page, with the font resource used for each line.
fn page_text(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Vec<(String, String)> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let mut font = String::new();
    let mut lines = Vec::new();

    for op in content.operations {
        match op.operator.as_str() {
            "Tf" => {
                if let Object::Name(ref name) = op.operands[0] {
                    font = String::from_utf8_lossy(name).to_string();
                }
            }
            "Tj" => {
                if let Object::String(ref bytes, _) = op.operands[0] {
                    lines.push((font.clone(), String::from_utf8_lossy(bytes).to_string()));
                }
            }
            _ => {}
        }
    }

    lines
}

#[test]
fn test_sample_resume_single_page() {
    let bytes = encode_pdf(&Document::build(SAMPLE)).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let pages = pdf.get_pages();
    assert_eq!(pages.len(), 1);

    let page_id = *pages.get(&1).unwrap();
    let lines = page_text(&pdf, page_id);
    let expected = vec![
        ("F2", "JOHN DOE"),
        ("F2", "PROFESSIONAL SUMMARY"),
        ("F1", "Experienced engineer."),
        ("F2", "SKILLS"),
        ("F1", "- Go"),
        ("F1", "- Rust"),
    ];
    let actual: Vec<(&str, &str)> = lines
        .iter()
        .map(|(f, t)| (f.as_str(), t.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_long_resume_paginates() {
    let mut text = String::from("WORK EXPERIENCE\n");
    for i in 0..120 {
        text.push_str(&format!("- Delivered project number {}\n", i));
    }

    let doc = Document::build(&text);
    let layout = layout_pdf(&doc, &PdfOptions::default());
    assert!(layout.page_count >= 3);

    let bytes = encode_pdf(&doc).unwrap();
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let pages = pdf.get_pages();
    assert_eq!(pages.len(), layout.page_count);

    // every body line is drawn exactly once across all pages
    let drawn: usize = pages
        .values()
        .map(|id| page_text(&pdf, *id).len())
        .sum();
    assert_eq!(drawn, 121);
}

#[test]
fn test_no_baseline_below_bottom_margin() {
    let text = "- line\n".repeat(200);
    let options = PdfOptions::default();
    let layout = layout_pdf(&Document::build(&text), &options);

    for line in &layout.lines {
        assert!(line.y_mm <= options.bottom_limit_mm());
        assert!(line.y_mm >= options.margin_mm);
    }
    // the break happens on the first line whose cursor already passed the limit
    let first_on_page_two = layout.lines_on_page(1).next().unwrap();
    assert_eq!(first_on_page_two.y_mm, options.margin_mm);
    let last_on_page_one = layout.lines_on_page(0).last().unwrap();
    assert!(last_on_page_one.y_mm <= options.bottom_limit_mm());
}

#[test]
fn test_wrapped_paragraph_spans_pages() {
    let mut text = "- x\n".repeat(50);
    text.push_str(&"word ".repeat(400));

    let doc = Document::build(&text);
    let last_block = doc.len() - 1;
    let options = PdfOptions::default();
    let layout = layout_pdf(&doc, &options);

    let wrapped: Vec<_> = layout
        .lines
        .iter()
        .filter(|l| l.block_index == last_block)
        .collect();
    let pages: std::collections::BTreeSet<usize> = wrapped.iter().map(|l| l.page).collect();
    assert_eq!(pages.into_iter().collect::<Vec<_>>(), vec![0, 1]);

    let first_on_next_page = wrapped.iter().find(|l| l.page == 1).unwrap();
    assert_eq!(first_on_next_page.y_mm, options.margin_mm);

    for line in &layout.lines {
        assert!(line.y_mm <= options.bottom_limit_mm());
    }
}

#[test]
fn test_wrapped_body_line_fits_usable_width() {
    let line = "Designed, built and operated a multi-region event ingestion platform processing billions of records per month for analytics and billing teams";
    let options = PdfOptions::default();
    let layout = layout_pdf(&Document::build(line), &options);

    assert!(layout.lines.len() > 1);
    let max_pt = options.usable_width_mm() * atsaudit::render::MM_TO_PT;
    for placed in &layout.lines {
        assert_eq!(placed.font, StandardFont::Helvetica);
        assert!(StandardFont::Helvetica.measure(&placed.text, placed.size_pt) <= max_pt);
        assert_eq!(placed.block_index, 0);
    }
}

#[test]
fn test_uncompressed_output_and_title() {
    let options = PdfOptions::new()
        .with_compression(false)
        .with_title("John Doe");
    let bytes = encode_pdf_with(&Document::build(SAMPLE), &options).unwrap();

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_id).unwrap();
    match info.get(b"Title").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"John Doe"),
        other => panic!("Unexpected title object: {:?}", other),
    }
    assert!(info.get(b"Producer").is_ok());
    assert!(info.get(b"CreationDate").is_ok());
}

#[test]
fn test_empty_document_has_one_page() {
    let bytes = encode_pdf(&Document::build("")).unwrap();
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let pages = pdf.get_pages();
    assert_eq!(pages.len(), 1);
    assert!(page_text(&pdf, *pages.get(&1).unwrap()).is_empty());
}

#[test]
fn test_non_latin_text_is_encoded() {
    let doc = Document::build("- Zoë Łukasz café");
    let bytes = encode_pdf(&doc).unwrap();
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = *pdf.get_pages().get(&1).unwrap();

    let content = Content::decode(&pdf.get_page_content(page_id).unwrap()).unwrap();
    let raw = content
        .operations
        .iter()
        .find(|op| op.operator == "Tj")
        .and_then(|op| match &op.operands[0] {
            Object::String(bytes, _) => Some(bytes.clone()),
            _ => None,
        })
        .unwrap();

    // ë and é are WinAnsi; Ł has no base-letter decomposition
    assert_eq!(raw, b"- Zo\xEB ?ukasz caf\xE9".to_vec());
}
