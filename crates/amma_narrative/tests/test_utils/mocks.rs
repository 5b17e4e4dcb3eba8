//! Mock service implementations for deterministic tests.

use amma_core::{
    FileRecord, FinishReason, GenerateRequest, GenerateResponse, Message, NewFileRecord,
    ToolCall, ToolDefinition, VideoJob, VideoRequest,
};
use amma_error::{
    AgentError, AgentErrorKind, AmmaResult, DatabaseError, DatabaseErrorKind, DocumentError,
    DocumentErrorKind, VideoError,
};
use amma_interface::{
    ChatDriver, DocumentSource, ExtractedDocument, PatientFileStore, TextExtractor,
    VideoGenerator,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory patient file table.
#[derive(Default)]
pub struct MockFileStore {
    records: Vec<FileRecord>,
    query_error: Option<String>,
    fail_inserts: bool,
    inserts: Mutex<Vec<NewFileRecord>>,
    queries: AtomicUsize,
}

impl MockFileStore {
    /// Store holding `records`.
    pub fn with_records(records: Vec<FileRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Store whose queries fail with `message`.
    pub fn failing_query(message: &str) -> Self {
        Self {
            query_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Make every insert fail.
    pub fn with_failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    /// Records passed to `insert_file`.
    pub fn inserted(&self) -> Vec<NewFileRecord> {
        self.inserts.lock().unwrap().clone()
    }

    /// Number of `files_for_patient` calls.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatientFileStore for MockFileStore {
    async fn files_for_patient(&self, patient_email: &str) -> AmmaResult<Vec<FileRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.query_error {
            return Err(DatabaseError::new(DatabaseErrorKind::Request(message.clone())).into());
        }
        Ok(self
            .records
            .iter()
            .filter(|record| record.patient_email == patient_email)
            .cloned()
            .collect())
    }

    async fn all_files(&self) -> AmmaResult<Vec<FileRecord>> {
        Ok(self.records.clone())
    }

    async fn insert_file(&self, record: &NewFileRecord) -> AmmaResult<Vec<FileRecord>> {
        self.inserts.lock().unwrap().push(record.clone());
        if self.fail_inserts {
            return Err(DatabaseError::new(DatabaseErrorKind::Status {
                status: 500,
                message: "insert rejected".to_string(),
            })
            .into());
        }
        Ok(vec![FileRecord {
            patient_email: record.patient_email().clone(),
            doctor_email: Some(record.doctor_email().clone()),
            file_name: Some(record.file_name().clone()),
            file_type: Some(record.file_type().clone()),
            file_url: Some(record.file_url().clone()),
            created_at: Some("2025-03-01T12:00:00+00:00".to_string()),
        }])
    }

    async fn count_users(&self) -> AmmaResult<usize> {
        Ok(0)
    }
}

/// Serves document bytes by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct MockDocumentSource {
    documents: HashMap<String, Result<Vec<u8>, String>>,
    fetches: Mutex<Vec<String>>,
}

impl MockDocumentSource {
    /// Serve `body` at `url`.
    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents
            .insert(url.to_string(), Ok(body.as_bytes().to_vec()));
        self
    }

    /// Fail downloads of `url` with `message`.
    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.documents
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// URLs fetched, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentError> {
        self.fetches.lock().unwrap().push(url.to_string());
        match self.documents.get(url) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(message)) => Err(DocumentError::new(DocumentErrorKind::Download(
                message.clone(),
            ))),
            None => Err(DocumentError::new(DocumentErrorKind::Download(
                "404 Not Found".to_string(),
            ))),
        }
    }
}

/// Treats bytes as UTF-8 pages separated by form feeds.
///
/// Bodies starting with `CORRUPT` fail extraction.
pub struct StubExtractor;

impl TextExtractor for StubExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, DocumentError> {
        let text = String::from_utf8_lossy(bytes);
        if text.starts_with("CORRUPT") {
            return Err(DocumentError::new(DocumentErrorKind::Extraction(
                "invalid file header".to_string(),
            )));
        }
        Ok(ExtractedDocument {
            pages: text.split('\x0c').map(str::to_string).collect(),
        })
    }
}

/// Replays scripted chat replies and records every request.
#[derive(Default)]
pub struct MockChatDriver {
    replies: Mutex<VecDeque<GenerateResponse>>,
    repeat_last: Option<GenerateResponse>,
    requests: Mutex<Vec<GenerateRequest>>,
    tools_seen: Mutex<Vec<Vec<ToolDefinition>>>,
}

impl MockChatDriver {
    /// Driver that replies with `replies` in order, then errors.
    pub fn scripted(replies: Vec<GenerateResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Driver that answers every turn with `reply`.
    pub fn always(reply: GenerateResponse) -> Self {
        Self {
            repeat_last: Some(reply),
            ..Self::default()
        }
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Tool definitions offered on each turn.
    pub fn tools_seen(&self) -> Vec<Vec<ToolDefinition>> {
        self.tools_seen.lock().unwrap().clone()
    }

    /// Number of turns requested.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A reply carrying final text.
pub fn text_reply(text: &str) -> GenerateResponse {
    GenerateResponse {
        message: Message::assistant(Some(text.to_string()), Vec::new()),
        finish_reason: FinishReason::Stop,
    }
}

/// A reply asking for one tool call.
pub fn tool_reply(id: &str, name: &str, arguments: Value) -> GenerateResponse {
    GenerateResponse {
        message: Message::assistant(
            None,
            vec![ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            }],
        ),
        finish_reason: FinishReason::ToolCalls,
    }
}

#[async_trait]
impl ChatDriver for MockChatDriver {
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> AmmaResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        self.tools_seen.lock().unwrap().push(tools.to_vec());

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return Ok(reply);
        }
        match &self.repeat_last {
            Some(reply) => Ok(reply.clone()),
            None => Err(AgentError::new(AgentErrorKind::Api {
                status: 500,
                message: "no scripted reply".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Replays job snapshots; the last one repeats once the sequence runs out.
pub struct MockVideoGenerator {
    submit_result: Result<VideoJob, VideoError>,
    snapshots: Mutex<VecDeque<Result<VideoJob, VideoError>>>,
    last: Mutex<Option<Result<VideoJob, VideoError>>>,
    submissions: Mutex<Vec<VideoRequest>>,
    retrievals: AtomicUsize,
}

impl MockVideoGenerator {
    /// Accepts submissions with `submitted`, then polls through `snapshots`.
    pub fn new(submitted: VideoJob, snapshots: Vec<Result<VideoJob, VideoError>>) -> Self {
        Self {
            submit_result: Ok(submitted),
            snapshots: Mutex::new(snapshots.into()),
            last: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
            retrievals: AtomicUsize::new(0),
        }
    }

    /// Rejects every submission with `error`.
    pub fn rejecting(error: VideoError) -> Self {
        Self {
            submit_result: Err(error),
            snapshots: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
            retrievals: AtomicUsize::new(0),
        }
    }

    /// Number of status polls.
    pub fn retrieve_count(&self) -> usize {
        self.retrievals.load(Ordering::SeqCst)
    }

    /// Requests submitted, in order.
    pub fn submissions(&self) -> Vec<VideoRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoGenerator for MockVideoGenerator {
    async fn submit(&self, req: &VideoRequest) -> Result<VideoJob, VideoError> {
        self.submissions.lock().unwrap().push(req.clone());
        self.submit_result.clone()
    }

    async fn retrieve(&self, _job_id: &str) -> Result<VideoJob, VideoError> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        let next = self.snapshots.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(snapshot) = next {
            *last = Some(snapshot);
        }
        last.clone().unwrap_or_else(|| {
            Err(VideoError::new(amma_error::VideoErrorKind::Http(
                "no snapshot scripted".to_string(),
            )))
        })
    }
}
