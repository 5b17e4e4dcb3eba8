//! Language-model agent error types.

/// Specific error conditions for chat model calls and the agent loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AgentErrorKind {
    /// Request could not be sent or no response was received
    #[display("Chat request failed: {}", _0)]
    Http(String),
    /// Chat API answered with a non-success status
    #[display("Chat API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Service error message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to parse chat response: {}", _0)]
    Parse(String),
    /// Response contained no choices
    #[display("Chat API returned no choices")]
    EmptyResponse,
    /// Agent kept calling tools past the turn ceiling
    #[display("Agent exceeded the maximum of {} turns", _0)]
    MaxTurnsExceeded(usize),
    /// Tool execution failed inside the registry
    #[display("Tool '{}' failed: {}", name, message)]
    Tool {
        /// Tool name
        name: String,
        /// Failure description
        message: String,
    },
}

/// Agent error with source location tracking.
///
/// # Examples
///
/// ```
/// use amma_error::{AgentError, AgentErrorKind};
///
/// let err = AgentError::new(AgentErrorKind::MaxTurnsExceeded(10));
/// assert!(format!("{}", err).contains("10 turns"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Agent Error: {} at line {} in {}", kind, line, file)]
pub struct AgentError {
    /// The kind of error that occurred
    pub kind: AgentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AgentError {
    /// Create a new AgentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AgentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
