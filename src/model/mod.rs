//! Document model types for classified resume content.
//!
//! This module defines the intermediate representation shared by every
//! renderer: a flat, ordered list of blocks derived once from the resume
//! text. It also holds the structured verdict returned by the inference
//! provider.

mod analysis;
mod block;
mod document;

pub use analysis::{
    AnalysisResult, AuditFinding, CredibilityVerdict, OptimizationAudit, OptimizedResume,
    ResumeSections, Scores, SCORE_WEIGHTS,
};
pub use block::{Block, BlockKind};
pub use document::{build_document, Document};

#[cfg(test)]
pub(crate) use analysis::fixtures;
