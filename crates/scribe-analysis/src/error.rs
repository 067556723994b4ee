//! Error types for the analysis crate
//!
//! Covers:
//! - Source parsing failures
//! - Function lookup misses
//! - Project archive problems

/// Analysis error type
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Source could not be parsed at all
    #[error("failed to parse code: {0}")]
    ParseFailed(String),

    /// Requested function is not defined at module top level
    #[error("function '{0}' not found")]
    FunctionNotFound(String),

    /// Project archive error
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// Project archive errors
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Not a readable zip archive
    #[error("the uploaded file is not a valid zip archive")]
    InvalidArchive(#[source] zip::result::ZipError),

    /// Entry name escapes the extraction root
    #[error("zip file contains unsafe paths")]
    UnsafePath,

    /// Entry could not be read
    #[error("failed to read archive entry: {0}")]
    EntryRead(#[source] std::io::Error),
}
