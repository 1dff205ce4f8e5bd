//! Error types for fragment sources and document extraction.
//!
//! The clustering stages themselves are total and have no error type.
//! [`SourceError`] describes a collaborator failing to deliver a page, and
//! [`PdftabError`] a page for which no extraction path produced a table.

use thiserror::Error;

/// Failure of an external collaborator to deliver a page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// The page cannot be read without a password.
    #[error("page is encrypted")]
    Encrypted,
    /// The page content is malformed.
    #[error("corrupt page: {0}")]
    Corrupt(String),
    /// The page index is outside the document.
    #[error("page {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    /// The collaborator is not available for this document.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// Error reading collaborator output.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

/// A page for which every enabled extraction path failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdftabError {
    /// Structural extraction failed and OCR was disabled or not configured.
    #[error("page {page}: text extraction failed: {source}")]
    Structural {
        /// 1-indexed page number.
        page: usize,
        source: SourceError,
    },
    /// OCR was the only path attempted and it failed.
    #[error("page {page}: OCR failed: {source}")]
    Ocr { page: usize, source: SourceError },
    /// Structural extraction failed, then the OCR fallback failed too.
    #[error("page {page}: text extraction failed ({structural}); OCR fallback failed ({ocr})")]
    Fallback {
        page: usize,
        structural: SourceError,
        ocr: SourceError,
    },
}

impl PdftabError {
    /// 1-indexed page number the error refers to.
    pub fn page(&self) -> usize {
        match self {
            PdftabError::Structural { page, .. }
            | PdftabError::Ocr { page, .. }
            | PdftabError::Fallback { page, .. } => *page,
        }
    }
}
