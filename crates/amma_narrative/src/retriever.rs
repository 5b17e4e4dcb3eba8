//! Patient file retrieval.
//!
//! The retriever never fails: query errors, download errors, and
//! extraction errors all become inline text in the returned block, since
//! the block is read by the language model rather than by code.

use amma_core::FileRecord;
use amma_interface::{DocumentSource, PatientFileStore, TextExtractor};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

const HEAVY_RULE_WIDTH: usize = 80;
const LIGHT_RULE_WIDTH: usize = 80;
const PLACEHOLDER: &str = "Unknown";

/// Message returned when a patient has no records.
pub fn no_files_message(patient_email: &str) -> String {
    format!("No files found for patient {patient_email}")
}

fn heavy_rule() -> String {
    "=".repeat(HEAVY_RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(LIGHT_RULE_WIDTH)
}

/// Gathers every file of a patient into one text block.
///
/// Documents (`file` records named `*.pdf`) are downloaded and their text
/// inlined; every other record is listed by URL.
#[derive(Clone)]
pub struct FileRetriever {
    store: Arc<dyn PatientFileStore>,
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn TextExtractor>,
}

impl FileRetriever {
    /// Creates a retriever over the given services.
    pub fn new(
        store: Arc<dyn PatientFileStore>,
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            store,
            source,
            extractor,
        }
    }

    /// Build the file report for `patient_email`.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, patient_email: &str) -> String {
        let patient_email = patient_email.trim();
        if patient_email.is_empty() {
            warn!("Retrieval requested without a patient email");
            return "Error fetching files: patient email must not be empty".to_string();
        }

        let records = match self.store.files_for_patient(patient_email).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "File query failed");
                return format!("Error fetching files: {e}");
            }
        };

        if records.is_empty() {
            info!("No files found");
            return no_files_message(patient_email);
        }

        info!(files = records.len(), "Found files");

        let mut report = format!(
            "PATIENT FILES FOR: {patient_email}\nTotal Files: {}\n{}\n\n",
            records.len(),
            heavy_rule()
        );

        for (index, record) in records.iter().enumerate() {
            report.push_str(&file_header(index + 1, record));

            if record.is_document() {
                let content = self.read_document(record).await;
                report.push_str(&format!(
                    "CONTENT:\n{rule}\n{content}\n{rule}\n",
                    rule = light_rule()
                ));
            } else {
                report.push_str(&format!(
                    "URL: {}\n",
                    record.file_url.as_deref().unwrap_or("N/A")
                ));
            }
        }

        debug!(chars = report.len(), "Built file report");
        report
    }

    async fn read_document(&self, record: &FileRecord) -> String {
        let Some(url) = record.file_url.as_deref() else {
            warn!(file = ?record.file_name, "Document has no URL");
            return "  Download failed: record has no file URL".to_string();
        };

        let bytes = match self.source.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable document");
                return format!("  {}", e.kind);
            }
        };

        match self.extractor.extract(&bytes) {
            Ok(document) => document.render(),
            Err(e) => {
                warn!(error = %e, "Text extraction failed");
                format!("  {}", e.kind)
            }
        }
    }
}

impl std::fmt::Debug for FileRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRetriever").finish_non_exhaustive()
    }
}

fn file_header(number: usize, record: &FileRecord) -> String {
    let file_type = record
        .file_type
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    format!(
        "\n{rule}\nFILE {number}: {name}\n{rule}\nType: {file_type}\nDoctor: {doctor}\nDate: {date}\n\n",
        rule = heavy_rule(),
        name = record.file_name.as_deref().unwrap_or(PLACEHOLDER),
        doctor = record.doctor_email.as_deref().unwrap_or(PLACEHOLDER),
        date = record.created_at.as_deref().unwrap_or(PLACEHOLDER),
    )
}
