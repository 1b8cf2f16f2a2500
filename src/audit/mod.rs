//! Audit orchestration.
//!
//! An [`Auditor`] runs one resume through an [`InferenceProvider`], guarded
//! by a usage limit. The provider itself is an interface: this crate ships a
//! [`ReplayProvider`] that serves a recorded response, and callers plug in
//! whatever client they use for the real service.
//!
//! # Example
//!
//! ```
//! use atsaudit::audit::{AuditRequest, Auditor, MemoryUsage, ReplayProvider};
//! use std::sync::Arc;
//!
//! # fn main() -> atsaudit::Result<()> {
//! # let json = std::fs::read_to_string("tests/fixtures/analysis.json")?;
//! let auditor = Auditor::new(
//!     Arc::new(ReplayProvider::from_json(json)),
//!     Arc::new(MemoryUsage::new()),
//! );
//! let result = auditor.audit(&AuditRequest::new("JOHN DOE\nSKILLS\n- Rust"))?;
//! println!("{}", result.resume_text());
//! assert_eq!(auditor.used(), 1);
//! # Ok(())
//! # }
//! ```

pub mod prompt;
mod usage;

pub use prompt::{build_prompt, response_schema, GenerationConfig, ProviderRequest};
pub use usage::{FileUsage, MemoryUsage, UsageCounter, UsageGate, DEFAULT_USAGE_LIMIT};

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::AnalysisResult;

/// Shared cancellation flag for an in-flight audit.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// One audit request.
#[derive(Debug, Clone, Default)]
pub struct AuditRequest {
    /// Resume text as extracted or pasted
    pub resume_text: String,

    /// Optional job description to score against
    pub job_description: Option<String>,

    /// Optional cancellation flag
    pub cancellation: Option<CancellationToken>,
}

impl AuditRequest {
    /// Create a request for a resume.
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            ..Default::default()
        }
    }

    /// Attach a job description.
    pub fn with_job_description(mut self, job: impl Into<String>) -> Self {
        self.job_description = Some(job.into());
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Check if the request has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Service that scores and rewrites a resume.
pub trait InferenceProvider: Send + Sync {
    /// Name of this provider, for logs.
    fn name(&self) -> &str;

    /// Run the audit and return the structured verdict.
    fn analyze(&self, request: &AuditRequest) -> Result<AnalysisResult>;
}

/// Provider that answers every request with one recorded response.
#[derive(Debug)]
pub struct ReplayProvider {
    response: String,
    calls: AtomicUsize,
}

impl ReplayProvider {
    /// Replay a JSON response body.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            response: json.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replay a JSON response stored in a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_json(std::fs::read_to_string(path)?))
    }

    /// Number of requests served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceProvider for ReplayProvider {
    fn name(&self) -> &str {
        "replay"
    }

    fn analyze(&self, _request: &AuditRequest) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.response.trim().is_empty() {
            return Err(Error::Provider("Provider returned empty audit data".to_string()));
        }
        AnalysisResult::from_json(&self.response)
    }
}

/// Runs audits through a provider under a usage limit.
pub struct Auditor {
    provider: Arc<dyn InferenceProvider>,
    usage: Arc<dyn UsageCounter>,
    gate: UsageGate,
}

impl Auditor {
    /// Create an auditor with the default usage limit.
    pub fn new(provider: Arc<dyn InferenceProvider>, usage: Arc<dyn UsageCounter>) -> Self {
        Self {
            provider,
            usage,
            gate: UsageGate::default(),
        }
    }

    /// Set the usage limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.gate = UsageGate::new(limit);
        self
    }

    /// Audits completed so far.
    pub fn used(&self) -> u32 {
        self.usage.current_count()
    }

    /// Audits still allowed.
    pub fn remaining(&self) -> u32 {
        self.gate.remaining(self.used())
    }

    /// The usage limit in force.
    pub fn gate(&self) -> UsageGate {
        self.gate
    }

    /// Run one audit.
    ///
    /// Fails without calling the provider when the resume is blank, the
    /// limit is used up or the request was cancelled. Only a successful,
    /// uncancelled audit counts towards the limit.
    pub fn audit(&self, request: &AuditRequest) -> Result<AnalysisResult> {
        if request.resume_text.trim().is_empty() {
            return Err(Error::EmptyResume);
        }

        self.gate.check(self.used())?;

        if request.is_cancelled() {
            return Err(Error::Cancelled);
        }

        log::debug!(
            "Running audit with '{}' provider ({} chars)",
            self.provider.name(),
            request.resume_text.chars().count()
        );
        let result = self.provider.analyze(request)?;

        if request.is_cancelled() {
            log::debug!("Audit cancelled while the provider was running");
            return Err(Error::Cancelled);
        }

        if let Err(e) = self.usage.increment() {
            log::warn!("Failed to save usage count: {}", e);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::SAMPLE_RESPONSE;

    fn auditor(usage: Arc<MemoryUsage>) -> (Auditor, Arc<ReplayProvider>) {
        let provider = Arc::new(ReplayProvider::from_json(SAMPLE_RESPONSE));
        (Auditor::new(provider.clone(), usage), provider)
    }

    #[test]
    fn test_audit_increments_usage() {
        let usage = Arc::new(MemoryUsage::new());
        let (auditor, provider) = auditor(usage.clone());

        let result = auditor.audit(&AuditRequest::new("resume")).unwrap();
        assert_eq!(result.corrected_after_optimization.final_ats_score, 68.0);
        assert_eq!(usage.current_count(), 1);
        assert_eq!(provider.calls(), 1);
        assert_eq!(auditor.remaining(), 1);
    }

    #[test]
    fn test_blank_resume_skips_provider() {
        let (auditor, provider) = auditor(Arc::new(MemoryUsage::new()));
        assert!(matches!(
            auditor.audit(&AuditRequest::new(" \n\t")),
            Err(Error::EmptyResume)
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_limit_reached() {
        let usage = Arc::new(MemoryUsage::with_count(2));
        let (auditor, provider) = auditor(usage.clone());

        let err = auditor.audit(&AuditRequest::new("resume")).unwrap_err();
        assert!(matches!(err, Error::UsageLimitReached { used: 2, limit: 2 }));
        assert_eq!(provider.calls(), 0);
        assert_eq!(usage.current_count(), 2);
    }

    #[test]
    fn test_cancelled_before_call() {
        let usage = Arc::new(MemoryUsage::new());
        let (auditor, provider) = auditor(usage.clone());
        let token = CancellationToken::new();
        token.cancel();

        let request = AuditRequest::new("resume").with_cancellation(token);
        assert!(matches!(auditor.audit(&request), Err(Error::Cancelled)));
        assert_eq!(provider.calls(), 0);
        assert_eq!(usage.current_count(), 0);
    }

    #[test]
    fn test_provider_error_does_not_count() {
        let usage = Arc::new(MemoryUsage::new());
        let auditor = Auditor::new(Arc::new(ReplayProvider::from_json("{}")), usage.clone());

        assert!(matches!(
            auditor.audit(&AuditRequest::new("resume")),
            Err(Error::InvalidResponse(_))
        ));
        assert_eq!(usage.current_count(), 0);
    }

    #[test]
    fn test_empty_replay_is_provider_error() {
        let provider = ReplayProvider::from_json("  ");
        assert!(matches!(
            provider.analyze(&AuditRequest::new("resume")),
            Err(Error::Provider(_))
        ));
    }

    #[test]
    fn test_custom_limit() {
        let (auditor, _) = auditor(Arc::new(MemoryUsage::new()));
        let auditor = auditor.with_limit(1);
        assert!(auditor.audit(&AuditRequest::new("resume")).is_ok());
        assert!(matches!(
            auditor.audit(&AuditRequest::new("resume")),
            Err(Error::UsageLimitReached { used: 1, limit: 1 })
        ));
    }
}
