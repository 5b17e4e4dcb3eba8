//! Document download and extraction error types.
//!
//! These never abort a retrieval; the retriever renders them inline.

/// Specific error conditions for fetching and reading a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DocumentErrorKind {
    /// Transport failure or non-success status while downloading
    #[display("Download failed: {}", _0)]
    Download(String),
    /// Document bytes could not be parsed or text could not be extracted
    #[display("PDF read failed: {}", _0)]
    Extraction(String),
    /// No extraction backend was compiled in
    #[display("PDF reader not available (build with the `pdf` feature)")]
    ReaderUnavailable,
}

/// Document error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Document Error: {} at line {} in {}", kind, line, file)]
pub struct DocumentError {
    /// The kind of error that occurred
    pub kind: DocumentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DocumentError {
    /// Create a new DocumentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DocumentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
