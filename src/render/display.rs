//! Screen rendering: block sequence to styled display nodes.
//!
//! The display layer owns layout and theming; this module only decides what
//! each block becomes. Blank blocks turn into fixed-height spacers, headings
//! into emphasized text and body lines into plain text kept verbatim.

use crate::model::{BlockKind, Document};
use serde::{Deserialize, Serialize};

use super::{DisplayOptions, DisplayStyle};

/// A UI-ready element for one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayNode {
    /// Vertical gap with no text.
    Spacer {
        /// Height in CSS pixels
        height_px: f32,
    },

    /// Section heading.
    Heading {
        /// Upper-cased heading text
        text: String,
        /// Heading style
        style: DisplayStyle,
    },

    /// Body line.
    Body {
        /// Original line text
        text: String,
        /// Body style
        style: DisplayStyle,
    },
}

impl DisplayNode {
    /// Text carried by the node, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayNode::Spacer { .. } => None,
            DisplayNode::Heading { text, .. } | DisplayNode::Body { text, .. } => Some(text),
        }
    }

    /// Check if this node is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, DisplayNode::Heading { .. })
    }
}

/// Render a document with default display options.
pub fn render_for_display(doc: &Document) -> Vec<DisplayNode> {
    render_for_display_with(doc, &DisplayOptions::default())
}

/// Render a document with explicit display options.
pub fn render_for_display_with(doc: &Document, options: &DisplayOptions) -> Vec<DisplayNode> {
    doc.iter()
        .map(|block| match block.kind {
            BlockKind::Blank => DisplayNode::Spacer {
                height_px: options.spacer_height_px,
            },
            BlockKind::Heading => DisplayNode::Heading {
                text: block.text.clone(),
                style: options.heading_style,
            },
            BlockKind::Body => DisplayNode::Body {
                text: block.text.clone(),
                style: options.body_style,
            },
        })
        .collect()
}

/// Serialize display nodes as an HTML fragment with inline styles.
pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut output = String::new();

    for node in nodes {
        match node {
            DisplayNode::Spacer { height_px } => {
                output.push_str(&format!(
                    "<div class=\"resume-spacer\" style=\"height:{}px\"></div>\n",
                    height_px
                ));
            }
            DisplayNode::Heading { text, style } => {
                output.push_str(&format!(
                    "<p class=\"resume-heading\" style=\"{}\">{}</p>\n",
                    css(style),
                    escape_html(text)
                ));
            }
            DisplayNode::Body { text, style } => {
                output.push_str(&format!(
                    "<p class=\"resume-body\" style=\"{}\">{}</p>\n",
                    css(style),
                    escape_html(text)
                ));
            }
        }
    }

    output
}

fn css(style: &DisplayStyle) -> String {
    let mut rules = vec![
        format!("font-size:{}px", style.font_size_px),
        format!(
            "font-weight:{}",
            if style.bold { "800" } else { "400" }
        ),
    ];
    if style.letter_spacing_em != 0.0 {
        rules.push(format!("letter-spacing:{}em", style.letter_spacing_em));
    }
    if style.margin_top_px != 0.0 || style.margin_bottom_px != 0.0 {
        rules.push(format!(
            "margin:{}px 0 {}px 0",
            style.margin_top_px, style.margin_bottom_px
        ));
    }
    rules.push("white-space:pre-wrap".to_string());
    rules.join(";")
}

/// Escape text for HTML element content.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
