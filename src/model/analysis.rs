//! Structured audit verdict returned by the inference provider.
//!
//! Field names match the provider's response schema exactly, so a response
//! body deserializes straight into [`AnalysisResult`].

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Weights applied to the five sub-scores when computing a final score.
pub const SCORE_WEIGHTS: [f64; 5] = [0.25, 0.25, 0.20, 0.15, 0.15];

/// Complete audit verdict for one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Issues found in the original resume
    pub audit_findings: Vec<AuditFinding>,

    /// Scores of the resume as submitted
    pub corrected_before_optimization: OptimizationAudit,

    /// The rewritten resume
    pub corrected_optimized_resume: OptimizedResume,

    /// Scores of the rewritten resume
    pub corrected_after_optimization: OptimizationAudit,

    /// Credibility assessment of the score change
    pub credibility_verdict: CredibilityVerdict,
}

impl AnalysisResult {
    /// Parse a provider response body.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The rewritten plain-text resume that feeds the export pipeline.
    pub fn resume_text(&self) -> &str {
        &self.corrected_optimized_resume.plain_text
    }

    /// Final score change from before to after optimization.
    pub fn score_delta(&self) -> f64 {
        self.corrected_after_optimization.final_ats_score
            - self.corrected_before_optimization.final_ats_score
    }
}

/// One finding in the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub issue: String,
    pub why_it_is_a_problem: String,
    pub ats_real_world_impact: String,
    pub correction_applied: String,
}

/// Score block for one version of the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationAudit {
    pub scores: Scores,
    pub final_ats_score: f64,
    pub ats_confidence_level: f64,
    pub ats_rejection_risk: String,
}

/// The five weighted sub-scores (0-100 each).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub ats_structure: f64,
    pub keyword_match: f64,
    pub experience_impact: f64,
    pub formatting_readability: f64,
    pub seniority_alignment: f64,
}

impl Scores {
    /// Sub-scores in weight order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.ats_structure,
            self.keyword_match,
            self.experience_impact,
            self.formatting_readability,
            self.seniority_alignment,
        ]
    }

    /// Weighted total using [`SCORE_WEIGHTS`].
    pub fn weighted(&self) -> f64 {
        self.as_array()
            .iter()
            .zip(SCORE_WEIGHTS.iter())
            .map(|(score, weight)| score * weight)
            .sum()
    }
}

/// Rewritten resume, as one block of text and split by section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedResume {
    pub plain_text: String,
    pub sections: ResumeSections,
}

/// Section-by-section content of the rewritten resume.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeSections {
    pub summary: String,
    pub experience: String,
    pub skills: String,
    pub education: String,
}

impl ResumeSections {
    /// Compose a plain-text resume with canonical section headings.
    ///
    /// Empty sections are left out. The result classifies back into the
    /// same headings through [`crate::model::Document::build`].
    pub fn to_plain_text(&self) -> String {
        let sections = [
            ("PROFESSIONAL SUMMARY", &self.summary),
            ("WORK EXPERIENCE", &self.experience),
            ("EDUCATION", &self.education),
            ("SKILLS", &self.skills),
        ];

        sections
            .iter()
            .filter(|(_, body)| !body.trim().is_empty())
            .map(|(heading, body)| format!("{}\n{}", heading, body.trim_end()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Verdict on whether the score change is believable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityVerdict {
    pub score_change_rationale: String,
    pub trust_level: String,
    pub enterprise_readiness: String,
}
