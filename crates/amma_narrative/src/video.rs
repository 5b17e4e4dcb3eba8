//! Video job submission and polling.

use crate::{ResultRecorder, derive_video_prompt};
use amma_core::{PromptConfig, VideoConfig, VideoRequest, VideoStatus};
use amma_error::{VideoError, VideoErrorKind, VideoFailureCategory};
use amma_interface::VideoGenerator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Submission and polling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSettings {
    /// Video model identifier
    pub model: String,
    /// Output resolution
    pub size: String,
    /// Duration in seconds, as a string
    pub seconds: String,
    /// Delay between status polls
    pub poll_interval: Duration,
    /// Status polls before giving up
    pub max_attempts: u32,
    /// Prompt derivation limits
    pub prompt: PromptConfig,
}

impl From<&VideoConfig> for VideoSettings {
    fn from(config: &VideoConfig) -> Self {
        Self {
            model: config.model.clone(),
            size: config.size.clone(),
            seconds: config.seconds.clone(),
            poll_interval: config.poll_interval(),
            max_attempts: config.max_attempts,
            prompt: config.prompt,
        }
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self::from(&VideoConfig::default())
    }
}

/// How a video job ended.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoOutcome {
    /// The job produced a video
    Completed {
        /// Job handle
        job_id: String,
        /// Where the video can be fetched
        url: String,
        /// Status polls made
        attempts: u32,
        /// Whether a record was written for the doctor
        recorded: bool,
    },
    /// Submission, polling, or the job itself failed
    Failed {
        /// Job handle, absent when submission failed
        job_id: Option<String>,
        /// Failure description
        reason: String,
        /// Category used to pick remediation guidance
        category: VideoFailureCategory,
    },
    /// The job was still running after the last poll
    TimedOut {
        /// Job handle
        job_id: String,
        /// Status polls made
        attempts: u32,
    },
}

impl VideoOutcome {
    /// URL of the produced video, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            VideoOutcome::Completed { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Collapse to the video URL, if any.
    pub fn into_url(self) -> Option<String> {
        match self {
            VideoOutcome::Completed { url, .. } => Some(url),
            _ => None,
        }
    }

    fn failed(job_id: Option<&str>, error: &VideoError) -> Self {
        VideoOutcome::Failed {
            job_id: job_id.map(str::to_string),
            reason: error.kind.to_string(),
            category: error.category(),
        }
    }
}

enum PollResult {
    Completed { url: String, attempts: u32 },
    Failed(VideoError),
    TimedOut { attempts: u32 },
}

/// Turns a script into a video and records it.
///
/// Video errors never escape: every failure mode ends in a
/// [`VideoOutcome`] so the script survives a broken video step.
#[derive(Clone)]
pub struct VideoJobDriver {
    generator: Arc<dyn VideoGenerator>,
    recorder: Option<ResultRecorder>,
    settings: VideoSettings,
}

impl VideoJobDriver {
    /// Creates a driver that records nothing.
    pub fn new(generator: Arc<dyn VideoGenerator>, settings: VideoSettings) -> Self {
        Self {
            generator,
            recorder: None,
            settings,
        }
    }

    /// Record completed videos with `recorder`.
    pub fn with_recorder(mut self, recorder: ResultRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Submission and polling parameters.
    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    /// Generate a video for `script`.
    ///
    /// A record is written only when the job completes, a doctor is given,
    /// and a recorder is attached.
    #[instrument(skip(self, script), fields(model = %self.settings.model))]
    pub async fn run(
        &self,
        script: &str,
        patient_email: &str,
        doctor_email: Option<&str>,
    ) -> VideoOutcome {
        let prompt = derive_video_prompt(script, &self.settings.prompt);
        info!(prompt = %prompt, "Derived video prompt");
        self.run_prompt(prompt, patient_email, doctor_email).await
    }

    /// Generate a video from an already derived prompt.
    #[instrument(skip(self, prompt), fields(model = %self.settings.model))]
    pub async fn run_prompt(
        &self,
        prompt: String,
        patient_email: &str,
        doctor_email: Option<&str>,
    ) -> VideoOutcome {
        let request = VideoRequest {
            model: self.settings.model.clone(),
            prompt,
            size: self.settings.size.clone(),
            seconds: self.settings.seconds.clone(),
        };

        let job = match self.generator.submit(&request).await {
            Ok(job) => job,
            Err(e) => {
                error!(error = %e, category = %e.category(), "Video submission failed");
                return VideoOutcome::failed(None, &e);
            }
        };
        info!(job_id = %job.id, status = %job.status, "Video job submitted");

        match self.poll(&job.id).await {
            PollResult::Completed { url, attempts } => {
                info!(job_id = %job.id, url = %url, attempts, "Video generated");
                let recorded = match (&self.recorder, doctor_email) {
                    (Some(recorder), Some(doctor_email)) => {
                        recorder.record(patient_email, doctor_email, &url).await
                    }
                    _ => {
                        debug!("No doctor email; skipping record");
                        false
                    }
                };
                VideoOutcome::Completed {
                    job_id: job.id,
                    url,
                    attempts,
                    recorded,
                }
            }
            PollResult::Failed(e) => {
                error!(job_id = %job.id, error = %e, category = %e.category(), "Video job failed");
                VideoOutcome::failed(Some(&job.id), &e)
            }
            PollResult::TimedOut { attempts } => {
                warn!(job_id = %job.id, attempts, "Video job timed out");
                VideoOutcome::TimedOut {
                    job_id: job.id,
                    attempts,
                }
            }
        }
    }

    async fn poll(&self, job_id: &str) -> PollResult {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let job = match self.generator.retrieve(job_id).await {
                Ok(job) => job,
                Err(e) => return PollResult::Failed(e),
            };

            match job.status {
                VideoStatus::Completed => {
                    return match job.output_url() {
                        Some(url) => PollResult::Completed {
                            url: url.to_string(),
                            attempts: attempt,
                        },
                        None => PollResult::Failed(VideoError::new(
                            VideoErrorKind::MissingOutput(job_id.to_string()),
                        )),
                    };
                }
                VideoStatus::Failed => {
                    return PollResult::Failed(VideoError::new(VideoErrorKind::JobFailed(
                        job.failure_reason(),
                    )));
                }
                status => {
                    info!(%status, attempt, max_attempts, progress = ?job.progress, "Video still rendering");
                    if attempt < max_attempts {
                        tokio::time::sleep(self.settings.poll_interval).await;
                    }
                }
            }
        }

        PollResult::TimedOut {
            attempts: max_attempts,
        }
    }
}

impl std::fmt::Debug for VideoJobDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoJobDriver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
