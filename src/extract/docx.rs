//! DOCX uploads: raw paragraph text from `word/document.xml`.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::render::DOCX_MIME_TYPE;

use super::TextExtractor;

const DOCUMENT_PART: &str = "word/document.xml";

struct DocxPatterns {
    paragraph: Regex,
    run_content: Regex,
    entity: Regex,
}

impl DocxPatterns {
    fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            paragraph: Regex::new(r"(?s)<w:p(?:\s[^>]*[^/])?>(.*?)</w:p>|<w:p(?:\s[^>]*)?/>")?,
            run_content: Regex::new(
                r"(?s)<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>|<w:cr/>",
            )?,
            entity: Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);")?,
        })
    }
}

fn patterns() -> Result<&'static DocxPatterns> {
    static PATTERNS: OnceLock<std::result::Result<DocxPatterns, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(DocxPatterns::compile)
        .as_ref()
        .map_err(|e| Error::Other(format!("Invalid DOCX pattern: {}", e)))
}

/// DOCX text extractor.
///
/// Produces one line per paragraph. Tabs and line breaks inside a
/// paragraph are kept; formatting is discarded.
#[derive(Debug, Clone, Default)]
pub struct DocxTextExtractor {
    _private: (),
}

impl DocxTextExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for DocxTextExtractor {
    fn mime_types(&self) -> &[&str] {
        &[DOCX_MIME_TYPE]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::Extract(format!("Not a DOCX container: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| Error::Extract(format!("Missing {}", DOCUMENT_PART)))?
            .read_to_string(&mut xml)?;

        document_text(&xml)
    }
}

/// Collect the text of every paragraph in a WordprocessingML body.
pub(crate) fn document_text(xml: &str) -> Result<String> {
    let patterns = patterns()?;

    let paragraphs: Vec<String> = patterns
        .paragraph
        .captures_iter(xml)
        .map(|caps| match caps.get(1) {
            Some(body) => paragraph_text(patterns, body.as_str()),
            None => String::new(),
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(patterns: &DocxPatterns, body: &str) -> String {
    let mut text = String::new();

    for caps in patterns.run_content.captures_iter(body) {
        match caps.get(1) {
            Some(run) => text.push_str(&decode_entities(patterns, run.as_str())),
            None if caps[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }

    text
}

fn decode_entities(patterns: &DocxPatterns, s: &str) -> String {
    patterns
        .entity
        .replace_all(s, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match name.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => name[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = r#"<w:document><w:body>
            <w:p><w:pPr><w:spacing w:before="200"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>SKILLS</w:t></w:r></w:p>
            <w:p w:rsidR="00AA"/>
            <w:p w:rsidR="00AB"><w:r><w:t xml:space="preserve">- Rust </w:t></w:r><w:r><w:t>&amp; Go</w:t></w:r></w:p>
        </w:body></w:document>"#;

        assert_eq!(document_text(xml).unwrap(), "SKILLS\n\n- Rust & Go");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";
        assert_eq!(document_text(xml).unwrap(), "A\tB\nC");
    }

    #[test]
    fn test_tab_stops_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>X</w:t></w:r></w:p>"#;
        assert_eq!(document_text(xml).unwrap(), "X");
    }

    #[test]
    fn test_numeric_entities() {
        let xml = "<w:p><w:r><w:t>caf&#233; &#x2013; &bogus;</w:t></w:r></w:p>";
        assert_eq!(document_text(xml).unwrap(), "café – &bogus;");
    }

    #[test]
    fn test_rejects_non_zip() {
        let err = DocxTextExtractor::new().extract(b"plain text").unwrap_err();
        assert!(matches!(err, Error::Extract(_)));
    }
}
