//! Trait definitions for the hosted services the pipeline talks to.

use amma_core::{
    FileRecord, GenerateRequest, GenerateResponse, NewFileRecord, ToolDefinition, VideoJob,
    VideoRequest,
};
use amma_error::{AmmaResult, DocumentError, VideoError};
use async_trait::async_trait;

/// Access to the `patient_files` table and friends.
#[async_trait]
pub trait PatientFileStore: Send + Sync {
    /// All file records for one patient, in the order the service returns them.
    async fn files_for_patient(&self, patient_email: &str) -> AmmaResult<Vec<FileRecord>>;

    /// Every file record in the table.
    async fn all_files(&self) -> AmmaResult<Vec<FileRecord>>;

    /// Insert one record, returning the rows the service echoed back.
    async fn insert_file(&self, record: &NewFileRecord) -> AmmaResult<Vec<FileRecord>>;

    /// Number of rows in the users table.
    async fn count_users(&self) -> AmmaResult<usize>;
}

/// Fetches raw document bytes by URL.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Download the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentError>;
}

/// Text of one extracted document, page by page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedDocument {
    /// Page texts in page order
    pub pages: Vec<String>,
}

impl ExtractedDocument {
    /// Render as `\n--- Page n ---\n{text}` blocks.
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, text)| format!("\n--- Page {} ---\n{}", index + 1, text))
            .collect()
    }
}

/// Turns document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `bytes`.
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, DocumentError>;
}

/// A chat model that supports function/tool calling.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Generate one reply; it may contain tool calls instead of text.
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> AmmaResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// A hosted asynchronous video-generation service.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Submit a job and return its initial snapshot.
    async fn submit(&self, req: &VideoRequest) -> Result<VideoJob, VideoError>;

    /// Fetch the current snapshot of a job.
    async fn retrieve(&self, job_id: &str) -> Result<VideoJob, VideoError>;
}
