//! Request and response types for chat generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// A chat generation request.
///
/// # Examples
///
/// ```
/// use amma_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .model(Some("gpt-4.1".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.temperature, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation so far
    pub messages: Vec<Message>,
    /// Model identifier; the driver's default when absent
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Why the model stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of the reply
    Stop,
    /// Token limit reached
    Length,
    /// The model wants tools run
    ToolCalls,
    /// Output was filtered
    ContentFilter,
    /// Anything else
    #[serde(other)]
    Other,
}

/// A single chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The assistant message
    pub message: Message,
    /// Why generation stopped
    pub finish_reason: FinishReason,
}
