use super::DEFAULT_BASE_URL;
use super::conversion::into_generate_response;
use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatTool, parse_api_error};
use amma_core::{AgentConfig, GenerateRequest, GenerateResponse, OpenAiConfig, ToolDefinition};
use amma_error::{AgentError, AgentErrorKind, AmmaResult};
use amma_interface::ChatDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// OpenAI chat-completions client with function calling.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIClient {
    /// Creates a new client against the public API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Default model identifier (e.g., "gpt-4.1")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI chat client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Creates a client from configuration, reading `OPENAI_API_KEY`.
    pub fn from_config(openai: &OpenAiConfig, agent: &AgentConfig) -> AmmaResult<Self> {
        let api_key = openai.resolve_api_key()?;
        Ok(Self::new(api_key, &agent.model).with_base_url(&openai.base_url))
    }

    /// Points the client at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a raw chat-completions request.
    #[instrument(skip(self, request), fields(model = %request.model, tools = request.tools.len()))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        debug!(messages = request.messages.len(), "Sending request to chat API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to chat API");
                AgentError::new(AgentErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat API returned error");
            let (_, message) = parse_api_error(&body);
            return Err(AgentError::new(AgentErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat response");
            AgentError::new(AgentErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = ?completion.id, "Received response from chat API");
        Ok(completion)
    }

    fn convert_request(
        &self,
        request: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: request.messages.iter().map(ChatMessage::from).collect(),
            tools: tools.iter().map(ChatTool::from).collect(),
            temperature: request.temperature,
            max_completion_tokens: request.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl ChatDriver for OpenAIClient {
    #[instrument(skip(self, req, tools))]
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> AmmaResult<GenerateResponse> {
        let request = self.convert_request(req, tools);
        let completion = self.chat_completion(&request).await?;
        Ok(into_generate_response(completion)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
