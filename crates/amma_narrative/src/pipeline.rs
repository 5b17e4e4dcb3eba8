//! End-to-end run: files, script, optional video.

use crate::{
    FileRetriever, ResultRecorder, ScriptGenerator, VideoJobDriver, VideoOutcome, VideoSettings,
};
use amma_core::AmmaConfig;
use amma_error::AmmaResult;
use amma_interface::{ChatDriver, DocumentSource, PatientFileStore, TextExtractor, VideoGenerator};
use std::sync::Arc;
use tracing::{info, instrument};

/// The long-lived services a pipeline runs on.
#[derive(Clone)]
pub struct PipelineServices {
    /// Persistence service
    pub store: Arc<dyn PatientFileStore>,
    /// Document downloader
    pub source: Arc<dyn DocumentSource>,
    /// Document text extractor
    pub extractor: Arc<dyn TextExtractor>,
    /// Chat model
    pub chat: Arc<dyn ChatDriver>,
    /// Video service
    pub video: Arc<dyn VideoGenerator>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRun {
    /// The narration script
    pub script: String,
    /// Video result, when a video was requested
    pub video: Option<VideoOutcome>,
}

impl ScriptRun {
    /// URL of the generated video, if one was produced.
    pub fn video_url(&self) -> Option<&str> {
        self.video.as_ref().and_then(VideoOutcome::url)
    }
}

/// Runs the script generator and then, optionally, the video driver.
#[derive(Debug)]
pub struct VideoScriptPipeline {
    scripts: ScriptGenerator,
    videos: VideoJobDriver,
}

impl VideoScriptPipeline {
    /// Creates a pipeline from its two stages.
    pub fn new(scripts: ScriptGenerator, videos: VideoJobDriver) -> Self {
        Self { scripts, videos }
    }

    /// Wire the stages from services and configuration.
    pub fn from_services(services: PipelineServices, config: &AmmaConfig) -> Self {
        let retriever = Arc::new(FileRetriever::new(
            Arc::clone(&services.store),
            services.source,
            services.extractor,
        ));
        let scripts = ScriptGenerator::new(services.chat, retriever, &config.agent);
        let videos = VideoJobDriver::new(services.video, VideoSettings::from(&config.video))
            .with_recorder(ResultRecorder::new(services.store));
        Self::new(scripts, videos)
    }

    /// Generate the narration script.
    ///
    /// # Errors
    ///
    /// Any agent error; these are fatal.
    pub async fn generate_script(&self, patient_email: &str) -> AmmaResult<String> {
        self.scripts.generate(patient_email).await
    }

    /// Generate and record a video for an existing script.
    pub async fn produce_video(
        &self,
        script: &str,
        patient_email: &str,
        doctor_email: Option<&str>,
    ) -> VideoOutcome {
        self.videos.run(script, patient_email, doctor_email).await
    }

    /// Run both stages.
    ///
    /// # Errors
    ///
    /// Only script generation errors are returned; video failures are
    /// reported in [`ScriptRun::video`].
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        patient_email: &str,
        generate_video: bool,
        doctor_email: Option<&str>,
    ) -> AmmaResult<ScriptRun> {
        let script = self.generate_script(patient_email).await?;

        let video = if generate_video {
            Some(
                self.produce_video(&script, patient_email, doctor_email)
                    .await,
            )
        } else {
            None
        };

        info!(video = video.is_some(), "Pipeline complete");
        Ok(ScriptRun { script, video })
    }
}
