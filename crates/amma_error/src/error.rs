//! Top-level error wrapper types.

use crate::{AgentError, ConfigError, DatabaseError, DocumentError, HttpError, VideoError};

/// Every error the AMMA crates can raise.
///
/// # Examples
///
/// ```
/// use amma_error::{AmmaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: AmmaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AmmaErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration or missing prerequisite
    #[from(ConfigError)]
    Config(ConfigError),
    /// Persistence service error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Document download or extraction error
    #[from(DocumentError)]
    Document(DocumentError),
    /// Language-model agent error
    #[from(AgentError)]
    Agent(AgentError),
    /// Video-generation error
    #[from(VideoError)]
    Video(VideoError),
}

/// AMMA error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("AMMA Error: {}", _0)]
pub struct AmmaError(Box<AmmaErrorKind>);

impl AmmaError {
    /// Create a new error from a kind.
    pub fn new(kind: AmmaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AmmaErrorKind {
        &self.0
    }

    /// Whether this error is a missing prerequisite rather than a runtime failure.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(self.kind(), AmmaErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to AmmaErrorKind
impl<T> From<T> for AmmaError
where
    T: Into<AmmaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for AMMA operations.
///
/// # Examples
///
/// ```
/// use amma_error::{AmmaResult, HttpError};
///
/// fn fetch_data() -> AmmaResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// assert!(fetch_data().is_err());
/// ```
pub type AmmaResult<T> = std::result::Result<T, AmmaError>;
