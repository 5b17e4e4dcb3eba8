//! Video-generation job types.

use serde::{Deserialize, Serialize};

/// Status of a hosted video-generation job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Accepted, waiting for capacity
    #[display("queued")]
    Queued,
    /// Rendering
    #[serde(alias = "in_progress")]
    #[display("processing")]
    Processing,
    /// Finished with output
    #[display("completed")]
    Completed,
    /// Finished without output
    #[display("failed")]
    Failed,
    /// A status this program does not recognise; treated as non-terminal
    #[serde(other)]
    #[display("unknown")]
    Unknown,
}

impl VideoStatus {
    /// Whether polling can stop at this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

/// Output of a completed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOutput {
    /// Where the rendered video can be fetched
    pub url: String,
}

/// Error detail attached to a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VideoJobError {
    /// Machine-readable code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Display for VideoJobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, &self.code) {
            (Some(message), _) => write!(f, "{message}"),
            (None, Some(code)) => write!(f, "{code}"),
            (None, None) => write!(f, "Unknown error"),
        }
    }
}

/// Snapshot of a job as returned by the submit and retrieve calls.
///
/// # Examples
///
/// ```
/// use amma_core::{VideoJob, VideoStatus};
///
/// let job: VideoJob = serde_json::from_str(
///     r#"{"id":"video_123","status":"in_progress","progress":40}"#,
/// ).unwrap();
///
/// assert_eq!(job.status, VideoStatus::Processing);
/// assert_eq!(job.output_url(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJob {
    /// Job handle used for polling
    pub id: String,
    /// Current status
    pub status: VideoStatus,
    /// Present once completed
    #[serde(default)]
    pub output: Option<VideoOutput>,
    /// Present once failed
    #[serde(default)]
    pub error: Option<VideoJobError>,
    /// Completion percentage, if the service reports it
    #[serde(default)]
    pub progress: Option<f64>,
}

impl VideoJob {
    /// URL of the rendered video, if any.
    pub fn output_url(&self) -> Option<&str> {
        self.output.as_ref().map(|output| output.url.as_str())
    }

    /// Failure detail, defaulting to `Unknown error`.
    pub fn failure_reason(&self) -> String {
        self.error.clone().unwrap_or_default().to_string()
    }
}

/// Parameters of a video submission.
///
/// `seconds` is a string because the service only accepts fixed durations
/// given as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct VideoRequest {
    /// Video model identifier
    pub model: String,
    /// Text prompt
    pub prompt: String,
    /// Resolution, e.g. `1280x720`
    pub size: String,
    /// Duration in seconds
    pub seconds: String,
}

impl VideoRequest {
    /// Creates a new request builder.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }
}
