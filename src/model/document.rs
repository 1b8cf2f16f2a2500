//! Document-level types.

use super::{Block, BlockKind};
use crate::classify::{classify_with, HeadingRegistry};
use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of classified blocks.
///
/// Block `i` always derives from line `i` of the source text; nothing is
/// merged, dropped or reordered. Every renderer reads the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Build a document from resume text using the standard registry.
    pub fn build(text: &str) -> Self {
        Self::build_with(text, HeadingRegistry::standard())
    }

    /// Build a document from resume text using an explicit registry.
    pub fn build_with(text: &str, registry: &HeadingRegistry) -> Self {
        let blocks: Vec<Block> = text
            .split('\n')
            .map(|line| match classify_with(registry, line) {
                BlockKind::Heading => Block::heading(line),
                BlockKind::Body => Block::body(line),
                BlockKind::Blank => Block::blank(),
            })
            .collect();

        log::debug!(
            "Built document: {} blocks ({} headings)",
            blocks.len(),
            blocks.iter().filter(|b| b.is_heading()).count()
        );

        Self { blocks }
    }

    /// Get the blocks in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterate over the blocks in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Get a block by index.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Number of blocks (equal to the number of source lines).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count blocks of one kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }

    /// Indices of heading blocks, in order.
    pub fn heading_indices(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_heading())
            .map(|(i, _)| i)
            .collect()
    }

    /// Reassemble the display text, one block per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Build a [`Document`] from resume text.
pub fn build_document(text: &str) -> Document {
    Document::build(text)
}
