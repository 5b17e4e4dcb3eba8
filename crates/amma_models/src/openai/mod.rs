//! OpenAI chat and video clients.

mod chat;
mod conversion;
mod dto;
mod video;

pub use chat::OpenAIClient;
pub use video::OpenAIVideoClient;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
