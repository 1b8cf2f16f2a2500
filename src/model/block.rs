//! Block-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single resume line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Section heading (rendered bold and larger)
    Heading,
    /// Body content, kept verbatim
    Body,
    /// Vertical separation only
    Blank,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Heading => "heading",
            BlockKind::Body => "body",
            BlockKind::Blank => "blank",
        };
        f.write_str(name)
    }
}

/// One classified line of resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block classification
    pub kind: BlockKind,

    /// Display text: upper-cased and trimmed for headings, the original
    /// line for body content, empty for blanks
    pub text: String,
}

impl Block {
    /// Create a heading block from a raw line.
    pub fn heading(line: &str) -> Self {
        Self {
            kind: BlockKind::Heading,
            text: crate::classify::trim_line(line).to_uppercase(),
        }
    }

    /// Create a body block, keeping the line verbatim.
    pub fn body(line: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Body,
            text: line.into(),
        }
    }

    /// Create a blank separator.
    pub fn blank() -> Self {
        Self {
            kind: BlockKind::Blank,
            text: String::new(),
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Heading
    }

    /// Check if this is a blank separator.
    pub fn is_blank(&self) -> bool {
        self.kind == BlockKind::Blank
    }
}
