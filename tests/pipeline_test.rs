//! End-to-end tests: classification feeding every renderer.

use atsaudit::render::{docx_paragraphs, layout_pdf, DocxOptions, PdfOptions};
use atsaudit::{build_document, classify, render_for_display, BlockKind, Document, ResumeExport};

const SAMPLE: &str = "JOHN DOE\n\nPROFESSIONAL SUMMARY\nExperienced engineer.\n\nSKILLS\n- Go\n- Rust";

#[test]
fn test_sample_resume_blocks() {
    let doc = build_document(SAMPLE);
    let kinds: Vec<BlockKind> = doc.iter().map(|b| b.kind).collect();

    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading,
            BlockKind::Blank,
            BlockKind::Heading,
            BlockKind::Body,
            BlockKind::Blank,
            BlockKind::Heading,
            BlockKind::Body,
            BlockKind::Body,
        ]
    );
    assert_eq!(doc.heading_indices(), vec![0, 2, 5]);
    assert_eq!(doc.get(6).map(|b| b.text.as_str()), Some("- Go"));
}

#[test]
fn test_build_is_idempotent() {
    let text = "Summary\n  Led   migration  \n\nTECHNICAL SKILLS\n- AWS, GCP";
    assert_eq!(build_document(text), build_document(text));
}

#[test]
fn test_block_per_line_and_order() {
    let text = "a\n\nb\n\n\nC\n";
    let doc = build_document(text);
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(doc.len(), lines.len());
    for (block, line) in doc.iter().zip(&lines) {
        assert_eq!(block.kind, classify(line));
    }
}

#[test]
fn test_heading_text_is_normalized_body_is_verbatim() {
    let doc = build_document("  work experience  \n   - Rust, tokio   ");
    assert_eq!(doc.blocks()[0].text, "WORK EXPERIENCE");
    assert_eq!(doc.blocks()[1].text, "   - Rust, tokio   ");
}

#[test]
fn test_classification_examples() {
    assert_eq!(classify("PROJECTS OVERVIEW"), BlockKind::Heading);
    assert_eq!(classify("- Led a team of 5 engineers"), BlockKind::Body);
    assert_eq!(classify(""), BlockKind::Blank);
    assert_eq!(classify(&"A".repeat(70)), BlockKind::Body);
    assert_eq!(classify(&"A".repeat(60)), BlockKind::Heading);
    assert_eq!(classify("certifications"), BlockKind::Heading);
    assert_eq!(classify("- SKILLS"), BlockKind::Body);
    // short all-caps body lines are accepted as headings
    assert_eq!(classify("AWS"), BlockKind::Heading);
}

#[test]
fn test_heading_indices_agree_across_renderers() {
    let text = "JANE ROE\njane@example.com | +1 555 0100\n\nSUMMARY\nBackend engineer with a focus on storage systems and reliability.\n\nEXPERIENCE\nAcme Corp, Staff Engineer\n- Cut p99 latency by 40% by redesigning the cache layer and moving hot keys off the shared cluster\n- Mentored six engineers\n\nEDUCATION\nBSc Computer Science";
    let doc = Document::build(text);
    let expected = doc.heading_indices();

    let display: Vec<usize> = render_for_display(&doc)
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_heading())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(display, expected);

    let pdf = layout_pdf(&doc, &PdfOptions::default()).bold_block_indices();
    assert_eq!(pdf, expected);

    let docx: Vec<usize> = docx_paragraphs(&doc, &DocxOptions::default())
        .iter()
        .filter(|p| p.bold)
        .map(|p| p.block_index)
        .collect();
    assert_eq!(docx, expected);
}

#[test]
fn test_export_session_end_to_end() {
    let session = ResumeExport::new().with_title("John Doe").build(SAMPLE);

    let display = session.display();
    assert_eq!(display.len(), 8);

    let pdf = session.pdf().unwrap();
    assert_eq!(pdf.mime_type, "application/pdf");
    assert!(pdf.bytes.starts_with(b"%PDF-"));

    let docx = session.docx().unwrap();
    assert_eq!(
        docx.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert!(docx.bytes.starts_with(b"PK"));

    let stats = session.stats();
    assert_eq!(stats.block_count() as usize, session.document().len());
}

#[test]
fn test_document_serializes() {
    let doc = build_document("SKILLS\n- Rust");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["blocks"][0]["kind"], "heading");
    assert_eq!(json["blocks"][1]["text"], "- Rust");
}
