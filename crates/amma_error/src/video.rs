//! Video-generation error types and failure classification.

/// Specific error conditions for video-generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum VideoErrorKind {
    /// Request could not be sent or no response was received
    #[display("Video request failed: {}", _0)]
    Http(String),
    /// Video API answered with a non-success status
    #[display("Video API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code from the service, if any
        code: Option<String>,
        /// Service error message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to parse video response: {}", _0)]
    Parse(String),
    /// The job reached the failed state
    #[display("Video generation failed: {}", _0)]
    JobFailed(String),
    /// The job completed but carried no output URL
    #[display("Video job {} completed without an output URL", _0)]
    MissingOutput(String),
}

impl VideoErrorKind {
    /// Classify this error for operator guidance.
    ///
    /// Structured status and code win; otherwise falls back to
    /// [`VideoFailureCategory::classify_message`].
    pub fn category(&self) -> VideoFailureCategory {
        match self {
            VideoErrorKind::Api { status: 403, .. } => VideoFailureCategory::OrganizationVerification,
            VideoErrorKind::Api { status: 401, .. } => VideoFailureCategory::Authentication,
            VideoErrorKind::Api {
                code: Some(code), ..
            } if code == "insufficient_quota" => VideoFailureCategory::InsufficientQuota,
            other => VideoFailureCategory::classify_message(&other.to_string()),
        }
    }
}

/// Video error with source location tracking.
///
/// # Examples
///
/// ```
/// use amma_error::{VideoError, VideoErrorKind, VideoFailureCategory};
///
/// let err = VideoError::new(VideoErrorKind::Api {
///     status: 403,
///     code: None,
///     message: "Your organization must be verified to use the model".to_string(),
/// });
/// assert_eq!(err.category(), VideoFailureCategory::OrganizationVerification);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Video Error: {} at line {} in {}", kind, line, file)]
pub struct VideoError {
    /// The kind of error that occurred
    pub kind: VideoErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VideoError {
    /// Create a new VideoError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VideoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Classify this error for operator guidance.
    pub fn category(&self) -> VideoFailureCategory {
        self.kind.category()
    }
}

/// Coarse failure categories used only to pick remediation guidance.
///
/// Every category leads to the same control flow: the job is abandoned and
/// no video is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum VideoFailureCategory {
    /// The account's organization is not verified for the video model
    #[display("ORGANIZATION VERIFICATION REQUIRED")]
    OrganizationVerification,
    /// The account ran out of credits
    #[display("INSUFFICIENT QUOTA")]
    InsufficientQuota,
    /// The API key was rejected
    #[display("AUTHENTICATION ISSUE")]
    Authentication,
    /// Anything else
    #[display("UNCLASSIFIED FAILURE")]
    Other,
}

impl VideoFailureCategory {
    /// Best-effort classification from free-form error text.
    ///
    /// This is the only place substring matching on error text happens.
    pub fn classify_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if message.contains("must be verified to use the model") || message.contains("403") {
            VideoFailureCategory::OrganizationVerification
        } else if lower.contains("quota") {
            VideoFailureCategory::InsufficientQuota
        } else if message.contains("API key") || lower.contains("authentication") {
            VideoFailureCategory::Authentication
        } else {
            VideoFailureCategory::Other
        }
    }

    /// Remediation steps shown to the operator.
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            VideoFailureCategory::OrganizationVerification => &[
                "Your OpenAI organization needs to be verified for video model access.",
                "1. Go to: https://platform.openai.com/settings/organization/general",
                "2. Complete the 'Verify Organization' process",
                "3. Wait ~15 minutes for access to propagate",
                "4. Try again",
            ],
            VideoFailureCategory::InsufficientQuota => &[
                "You need to add credits to your OpenAI account.",
                "1. Go to: https://platform.openai.com/account/billing",
                "2. Add credits",
                "3. Try again",
            ],
            VideoFailureCategory::Authentication => &[
                "Your API key may be invalid or expired.",
                "1. Check your OPENAI_API_KEY environment variable",
                "2. Generate a new key at: https://platform.openai.com/api-keys",
            ],
            VideoFailureCategory::Other => &[
                "Possible solutions:",
                "1. Verify your OpenAI organization",
                "2. Check if your API key has video model permissions",
                "3. Check API quota/limits",
                "4. Try again in a few moments",
            ],
        }
    }
}
