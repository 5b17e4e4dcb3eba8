//! Core data types for the AMMA medical video script generator.
//!
//! This crate holds the records exchanged with the persistence service, the
//! video job model, the agent conversation types, and configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod file;
mod message;
mod request;
mod video;

pub use config::{
    AgentConfig, AmmaConfig, DatabaseConfig, OPENAI_API_KEY_ENV, OpenAiConfig, PromptConfig,
    RetrievalConfig, SUPABASE_KEY_ENV, VideoConfig,
};
pub use file::{DOCUMENT_EXTENSION, FileRecord, FileType, NewFileRecord};
pub use message::{Message, Role, ToolCall, ToolDefinition};
pub use request::{FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use video::{
    VideoJob, VideoJobError, VideoOutput, VideoRequest, VideoRequestBuilder, VideoStatus,
};
