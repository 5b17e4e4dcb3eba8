//! Persistence service error types.

/// Specific error conditions for persistence service calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Request could not be sent or no response was received
    #[display("Database request failed: {}", _0)]
    Request(String),
    /// Service answered with a non-success status
    #[display("Database returned HTTP {}: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or service error message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to parse database response: {}", _0)]
    Parse(String),
}

/// Persistence service error with source location tracking.
///
/// # Examples
///
/// ```
/// use amma_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::Status {
///     status: 404,
///     message: "relation does not exist".to_string(),
/// });
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
