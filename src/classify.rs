//! Line classification for plain-text resumes.
//!
//! A rewritten resume arrives as one flat string. Section structure is
//! recovered line by line: a line is either a section heading, a blank
//! separator or body content. Every renderer consumes the result of this
//! module through [`crate::model::Document`] and never classifies on its own.
//!
//! # Example
//!
//! ```
//! use atsaudit::classify::classify;
//! use atsaudit::model::BlockKind;
//!
//! assert_eq!(classify("Work Experience"), BlockKind::Heading);
//! assert_eq!(classify("PROJECTS OVERVIEW"), BlockKind::Heading);
//! assert_eq!(classify("- Led a team of 5 engineers"), BlockKind::Body);
//! assert_eq!(classify("   "), BlockKind::Blank);
//! ```

use crate::model::BlockKind;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Canonical section headers recognised regardless of case.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "SUMMARY",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROJECTS",
    "SKILLS",
    "TECHNICAL SKILLS",
    "EDUCATION",
    "CERTIFICATIONS",
    "LANGUAGES",
    "ADDITIONAL INFORMATION",
];

/// Longest trimmed line (in characters) the all-caps heuristic accepts.
pub const MAX_HEADING_CHARS: usize = 60;

/// Leading marker that always denotes a bullet line.
pub const BULLET_MARKER: char = '-';

/// Fixed set of section-header strings used as a fast-path lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRegistry {
    entries: HashSet<String>,
}

impl HeadingRegistry {
    /// Build a registry from arbitrary header strings.
    ///
    /// Entries are trimmed and upper-cased so lookups stay case-insensitive.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_uppercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { entries }
    }

    /// The shared registry holding [`DEFAULT_SECTION_HEADERS`].
    pub fn standard() -> &'static HeadingRegistry {
        static STANDARD: OnceLock<HeadingRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| HeadingRegistry::new(DEFAULT_SECTION_HEADERS))
    }

    /// Check whether an already upper-cased, trimmed header is registered.
    pub fn contains(&self, upper: &str) -> bool {
        self.entries.contains(upper)
    }

    /// Number of registered headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered headers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for HeadingRegistry {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// Classify one line against the standard registry.
pub fn classify(line: &str) -> BlockKind {
    classify_with(HeadingRegistry::standard(), line)
}

/// Classify one line against an explicit registry.
///
/// Never fails: every input maps to exactly one [`BlockKind`].
pub fn classify_with(registry: &HeadingRegistry, line: &str) -> BlockKind {
    let trimmed = trim_line(line);
    if trimmed.is_empty() {
        return BlockKind::Blank;
    }

    let upper = trimmed.to_uppercase();
    if registry.contains(&upper) {
        return BlockKind::Heading;
    }

    if looks_like_heading(trimmed, &upper) {
        return BlockKind::Heading;
    }

    BlockKind::Body
}

/// Trim whitespace and byte-order marks from both ends of a line.
pub(crate) fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// All-caps heuristic: no lowercase letters, no bullet marker, short enough.
///
/// Acronym-only lines without a bullet also pass; that trade-off is kept.
fn looks_like_heading(trimmed: &str, upper: &str) -> bool {
    trimmed == upper
        && !trimmed.starts_with(BULLET_MARKER)
        && trimmed.chars().count() <= MAX_HEADING_CHARS
}
