//! Error types for the atsaudit library.

use std::io;
use thiserror::Error;

/// Result type alias for atsaudit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while auditing, extracting or exporting a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An output encoder (PDF or DOCX) failed.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Text could not be extracted from an uploaded file.
    #[error("Text extraction error: {0}")]
    Extract(String),

    /// The uploaded file type is not handled by any extractor.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// The uploaded file exceeds the size limit.
    #[error("File size {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge {
        /// Size of the rejected file in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Extraction succeeded but produced no meaningful text.
    #[error("Could not extract meaningful text")]
    EmptyText,

    /// An audit was requested for an empty resume.
    #[error("Resume text is empty")]
    EmptyResume,

    /// The usage counter has reached its limit.
    #[error("Usage limit reached ({used} of {limit} audits used)")]
    UsageLimitReached {
        /// Completed audits so far
        used: u32,
        /// Maximum number of audits allowed
        limit: u32,
    },

    /// The audit was cancelled by the caller.
    #[error("Audit cancelled")]
    Cancelled,

    /// The inference provider failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider response did not match the expected shape.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Encode(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Encode(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::Extract(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}
