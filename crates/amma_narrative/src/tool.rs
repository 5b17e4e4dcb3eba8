//! The retriever exposed as an agent tool.

use crate::FileRetriever;
use amma_error::{AgentError, AgentErrorKind, AmmaResult};
use amma_interface::AgentTool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// Name the model uses to call [`PatientFilesTool`].
pub const PATIENT_FILES_TOOL: &str = "get_patient_files";

/// Fetches every file of a patient, with document text inlined.
#[derive(Debug, Clone)]
pub struct PatientFilesTool {
    retriever: Arc<FileRetriever>,
}

impl PatientFilesTool {
    /// Wraps a retriever.
    pub fn new(retriever: Arc<FileRetriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl AgentTool for PatientFilesTool {
    fn name(&self) -> &str {
        PATIENT_FILES_TOOL
    }

    fn description(&self) -> &str {
        "Fetch all medical files for a patient by email. Returns file metadata and the full text of PDF documents."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "patient_email": {
                    "type": "string",
                    "description": "Email address of the patient"
                }
            },
            "required": ["patient_email"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> AmmaResult<String> {
        let patient_email = input
            .get("patient_email")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AgentError::new(AgentErrorKind::Tool {
                    name: PATIENT_FILES_TOOL.to_string(),
                    message: "missing string argument 'patient_email'".to_string(),
                })
            })?;

        Ok(self.retriever.retrieve(patient_email).await)
    }
}
