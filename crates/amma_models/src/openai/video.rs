use super::DEFAULT_BASE_URL;
use super::dto::parse_api_error;
use amma_core::{OpenAiConfig, VideoJob, VideoRequest};
use amma_error::{AmmaResult, VideoError, VideoErrorKind};
use amma_interface::VideoGenerator;
use reqwest::{Client, Response};
use tracing::{debug, error, instrument};

/// Client for the OpenAI videos endpoint (Sora models).
#[derive(Debug, Clone)]
pub struct OpenAIVideoClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIVideoClient {
    /// Creates a new client against the public API.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new OpenAI video client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client from configuration, reading `OPENAI_API_KEY`.
    pub fn from_config(openai: &OpenAiConfig) -> AmmaResult<Self> {
        let api_key = openai.resolve_api_key()?;
        Ok(Self::new(api_key).with_base_url(&openai.base_url))
    }

    /// Points the client at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn decode(response: Response) -> Result<VideoJob, VideoError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Video API returned error");
            let (code, message) = parse_api_error(&body);
            return Err(VideoError::new(VideoErrorKind::Api {
                status: status.as_u16(),
                code,
                message,
            }));
        }

        response.json::<VideoJob>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse video job");
            VideoError::new(VideoErrorKind::Parse(e.to_string()))
        })
    }
}

#[async_trait::async_trait]
impl VideoGenerator for OpenAIVideoClient {
    #[instrument(skip(self, req), fields(model = %req.model, size = %req.size, seconds = %req.seconds))]
    async fn submit(&self, req: &VideoRequest) -> Result<VideoJob, VideoError> {
        debug!(prompt_chars = req.prompt.chars().count(), "Submitting video job");

        let response = self
            .client
            .post(format!("{}/videos", self.base_url))
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to submit video job");
                VideoError::new(VideoErrorKind::Http(e.to_string()))
            })?;

        let job = Self::decode(response).await?;
        debug!(job_id = %job.id, status = %job.status, "Video job submitted");
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn retrieve(&self, job_id: &str) -> Result<VideoJob, VideoError> {
        let response = self
            .client
            .get(format!("{}/videos/{}", self.base_url, job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to retrieve video job");
                VideoError::new(VideoErrorKind::Http(e.to_string()))
            })?;

        Self::decode(response).await
    }
}
