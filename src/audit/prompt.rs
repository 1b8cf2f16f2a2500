//! Provider request construction: instructions, output schema and
//! generation parameters.

use serde::Serialize;
use serde_json::{json, Value};

use super::AuditRequest;

/// Model the request is written for.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Response MIME type requested from the provider.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

const AUDITOR_INSTRUCTIONS: &str = "\
You are an ATS quality control auditor and resume scoring validator. \
Process the resume below the way a modern applicant tracking system would, \
and keep every score realistic and credible.

AUDIT OBJECTIVES:
1. Score the original resume, penalising markdown, generic content and poor formatting.
2. Compute each final score as Structure*0.25 + Keywords*0.25 + Impact*0.20 + Formatting*0.15 + Seniority*0.15.
3. Rewrite the resume as ATS-safe plain text: no markdown, no icons, no symbols.
4. Keep the rewrite between 500 and 700 words, structured for two pages.
5. Report a conservative ATS confidence level from 0 to 100.

RULES:
- Markdown formatting (**, ##) inside the resume text lowers the formatting score.
- An improvement of more than 15 points requires substantial structural changes.
- The optimized resume is plain text only, with section headings in upper case.";

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Fixed seed for reproducible output
    pub seed: u64,

    /// Requested response MIME type
    pub response_mime_type: &'static str,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            seed: 42,
            response_mime_type: RESPONSE_MIME_TYPE,
        }
    }
}

/// Everything a provider needs to run one audit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    /// Target model
    pub model: String,

    /// Full prompt text
    pub contents: String,

    /// Sampling parameters
    pub generation_config: GenerationConfig,

    /// Output schema the response must follow
    pub response_schema: Value,
}

impl ProviderRequest {
    /// Build the request for an audit.
    pub fn new(request: &AuditRequest) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            contents: build_prompt(request),
            generation_config: GenerationConfig::default(),
            response_schema: response_schema(),
        }
    }

    /// Target a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Compose the auditor prompt for a resume and optional job description.
pub fn build_prompt(request: &AuditRequest) -> String {
    let mut prompt = String::from(AUDITOR_INSTRUCTIONS);

    if let Some(job) = request
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|j| !j.is_empty())
    {
        prompt.push_str("\n\nTARGET JOB DESCRIPTION (score keyword match and seniority against it):\n\"\"\"\n");
        prompt.push_str(job);
        prompt.push_str("\n\"\"\"");
    }

    prompt.push_str("\n\nRESUME TO PROCESS:\n\"\"\"\n");
    prompt.push_str(&request.resume_text);
    prompt.push_str("\n\"\"\"");
    prompt
}

fn scores_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "ats_structure": { "type": "NUMBER" },
            "keyword_match": { "type": "NUMBER" },
            "experience_impact": { "type": "NUMBER" },
            "formatting_readability": { "type": "NUMBER" },
            "seniority_alignment": { "type": "NUMBER" }
        },
        "required": [
            "ats_structure",
            "keyword_match",
            "experience_impact",
            "formatting_readability",
            "seniority_alignment"
        ]
    })
}

fn optimization_audit_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scores": scores_schema(),
            "final_ats_score": { "type": "NUMBER" },
            "ats_confidence_level": { "type": "NUMBER" },
            "ats_rejection_risk": { "type": "STRING" }
        },
        "required": ["scores", "final_ats_score", "ats_confidence_level", "ats_rejection_risk"]
    })
}

/// Strict output schema of the audit response.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "audit_findings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "issue": { "type": "STRING" },
                        "why_it_is_a_problem": { "type": "STRING" },
                        "ats_real_world_impact": { "type": "STRING" },
                        "correction_applied": { "type": "STRING" }
                    },
                    "required": [
                        "issue",
                        "why_it_is_a_problem",
                        "ats_real_world_impact",
                        "correction_applied"
                    ]
                }
            },
            "corrected_before_optimization": optimization_audit_schema(),
            "corrected_optimized_resume": {
                "type": "OBJECT",
                "properties": {
                    "plain_text": { "type": "STRING" },
                    "sections": {
                        "type": "OBJECT",
                        "properties": {
                            "summary": { "type": "STRING" },
                            "experience": { "type": "STRING" },
                            "skills": { "type": "STRING" },
                            "education": { "type": "STRING" }
                        },
                        "required": ["summary", "experience", "skills", "education"]
                    }
                },
                "required": ["plain_text", "sections"]
            },
            "corrected_after_optimization": optimization_audit_schema(),
            "credibility_verdict": {
                "type": "OBJECT",
                "properties": {
                    "score_change_rationale": { "type": "STRING" },
                    "trust_level": { "type": "STRING" },
                    "enterprise_readiness": { "type": "STRING" }
                },
                "required": ["score_change_rationale", "trust_level", "enterprise_readiness"]
            }
        },
        "required": [
            "audit_findings",
            "corrected_before_optimization",
            "corrected_optimized_resume",
            "corrected_after_optimization",
            "credibility_verdict"
        ]
    })
}
