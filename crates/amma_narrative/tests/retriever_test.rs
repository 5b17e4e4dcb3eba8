//! Tests for patient file retrieval and its tool wrapper.

mod test_utils;

use amma_core::{FileRecord, FileType};
use amma_interface::AgentTool;
use amma_narrative::{FileRetriever, PATIENT_FILES_TOOL, PatientFilesTool, no_files_message};
use serde_json::json;
use std::sync::Arc;
use test_utils::{
    MockDocumentSource, MockFileStore, StubExtractor, document_record, video_record,
};

const PATIENT: &str = "pat@example.com";

fn retriever(store: MockFileStore, source: MockDocumentSource) -> FileRetriever {
    FileRetriever::new(Arc::new(store), Arc::new(source), Arc::new(StubExtractor))
}

#[tokio::test]
async fn test_no_files_returns_exact_message() {
    let retriever = retriever(MockFileStore::default(), MockDocumentSource::default());

    let report = retriever.retrieve(PATIENT).await;

    assert_eq!(report, "No files found for patient pat@example.com");
    assert_eq!(report, no_files_message(PATIENT));
}

#[tokio::test]
async fn test_empty_email_skips_query() {
    let store = Arc::new(MockFileStore::default());
    let retriever = FileRetriever::new(
        store.clone(),
        Arc::new(MockDocumentSource::default()),
        Arc::new(StubExtractor),
    );

    let report = retriever.retrieve("   ").await;

    assert!(report.starts_with("Error fetching files:"));
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn test_query_failure_is_inline() {
    let retriever = retriever(
        MockFileStore::failing_query("connection reset"),
        MockDocumentSource::default(),
    );

    let report = retriever.retrieve(PATIENT).await;

    assert!(report.starts_with("Error fetching files: "));
    assert!(report.contains("connection reset"));
}

#[tokio::test]
async fn test_documents_inlined_and_others_listed_in_order() {
    let store = MockFileStore::with_records(vec![
        document_record(PATIENT, "Bloodwork.pdf", "https://files.example.com/blood.pdf"),
        video_record(PATIENT, "https://videos.example.com/old.mp4"),
        document_record(PATIENT, "MRI Report.PDF", "https://files.example.com/mri.pdf"),
        document_record(PATIENT, "xray.png", "https://files.example.com/xray.png"),
    ]);
    let source = Arc::new(
        MockDocumentSource::default()
            .with_document("https://files.example.com/blood.pdf", "Hemoglobin 13.5")
            .with_document(
                "https://files.example.com/mri.pdf",
                "Mild disc bulge\x0cNo stenosis",
            ),
    );
    let retriever = FileRetriever::new(Arc::new(store), source.clone(), Arc::new(StubExtractor));

    let report = retriever.retrieve(PATIENT).await;

    assert!(report.starts_with(&format!(
        "PATIENT FILES FOR: {PATIENT}\nTotal Files: 4\n{}\n\n",
        "=".repeat(80)
    )));
    assert_eq!(report.matches("CONTENT:\n").count(), 2);
    assert_eq!(report.lines().filter(|line| line.starts_with("URL: ")).count(), 2);

    let positions: Vec<usize> = (1..=4)
        .map(|n| report.find(&format!("FILE {n}: ")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    assert!(report.contains("FILE 2: AI Generated Video - pat@example.com"));
    assert!(report.contains("URL: https://videos.example.com/old.mp4\n"));
    assert!(report.contains("URL: https://files.example.com/xray.png\n"));
    assert!(report.contains("\n--- Page 1 ---\nHemoglobin 13.5"));
    assert!(report.contains("\n--- Page 1 ---\nMild disc bulge\n--- Page 2 ---\nNo stenosis"));

    assert_eq!(
        source.fetched(),
        vec![
            "https://files.example.com/blood.pdf".to_string(),
            "https://files.example.com/mri.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_file_block_layout() {
    let store = MockFileStore::with_records(vec![document_record(
        PATIENT,
        "Labs.pdf",
        "https://files.example.com/labs.pdf",
    )]);
    let source = MockDocumentSource::default()
        .with_document("https://files.example.com/labs.pdf", "Cholesterol normal");
    let retriever = retriever(store, source);

    let report = retriever.retrieve(PATIENT).await;

    let heavy = "=".repeat(80);
    let light = "-".repeat(80);
    let expected_block = format!(
        "\n{heavy}\nFILE 1: Labs.pdf\n{heavy}\nType: file\nDoctor: doc@example.com\nDate: 2025-01-15T10:30:00+00:00\n\nCONTENT:\n{light}\n\n--- Page 1 ---\nCholesterol normal\n{light}\n"
    );
    assert!(report.ends_with(&expected_block), "report was:\n{report}");
}

#[tokio::test]
async fn test_download_and_extraction_failures_do_not_stop_retrieval() {
    let store = MockFileStore::with_records(vec![
        document_record(PATIENT, "a.pdf", "https://files.example.com/a.pdf"),
        document_record(PATIENT, "b.pdf", "https://files.example.com/b.pdf"),
        document_record(PATIENT, "c.pdf", "https://files.example.com/c.pdf"),
    ]);
    let source = MockDocumentSource::default()
        .with_failure("https://files.example.com/a.pdf", "timed out")
        .with_document("https://files.example.com/b.pdf", "CORRUPT bytes")
        .with_document("https://files.example.com/c.pdf", "All clear");
    let retriever = retriever(store, source);

    let report = retriever.retrieve(PATIENT).await;

    assert_eq!(report.matches("CONTENT:\n").count(), 3);
    assert!(report.contains("Download failed: timed out"));
    assert!(report.contains("PDF read failed: invalid file header"));
    assert!(report.contains("All clear"));
}

#[tokio::test]
async fn test_missing_columns_use_placeholders() {
    let store = MockFileStore::with_records(vec![FileRecord {
        patient_email: PATIENT.to_string(),
        doctor_email: None,
        file_name: None,
        file_type: Some(FileType::Other("scan".to_string())),
        file_url: None,
        created_at: None,
    }]);
    let retriever = retriever(store, MockDocumentSource::default());

    let report = retriever.retrieve(PATIENT).await;

    assert!(report.contains("FILE 1: Unknown\n"));
    assert!(report.contains("Doctor: Unknown\n"));
    assert!(report.contains("Date: Unknown\n"));
    assert!(report.contains("URL: N/A\n"));
}

#[tokio::test]
async fn test_tool_definition() {
    let tool = PatientFilesTool::new(Arc::new(retriever(
        MockFileStore::default(),
        MockDocumentSource::default(),
    )));

    let definition = tool.definition();

    assert_eq!(definition.name, PATIENT_FILES_TOOL);
    assert_eq!(definition.name, "get_patient_files");
    assert_eq!(definition.parameters["required"], json!(["patient_email"]));
}

#[tokio::test]
async fn test_tool_executes_retrieval() -> anyhow::Result<()> {
    let tool = PatientFilesTool::new(Arc::new(retriever(
        MockFileStore::default(),
        MockDocumentSource::default(),
    )));

    let output = tool.execute(json!({"patient_email": PATIENT})).await?;

    assert_eq!(output, no_files_message(PATIENT));
    Ok(())
}

#[tokio::test]
async fn test_tool_rejects_missing_argument() {
    let tool = PatientFilesTool::new(Arc::new(retriever(
        MockFileStore::default(),
        MockDocumentSource::default(),
    )));

    let result = tool.execute(json!({"email": PATIENT})).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_file_type_is_shown_as_stored() -> anyhow::Result<()> {
    let record: FileRecord = serde_json::from_value(json!({
        "patient_email": PATIENT,
        "file_name": "chest.jpg",
        "file_type": "image",
        "file_url": "https://files.example.com/chest.jpg"
    }))?;
    let retriever = retriever(
        MockFileStore::with_records(vec![record]),
        MockDocumentSource::default(),
    );

    let report = retriever.retrieve(PATIENT).await;

    assert!(report.contains("Type: image\n"), "report was:\n{report}");
    assert!(report.contains("URL: https://files.example.com/chest.jpg\n"));
    assert_eq!(report.matches("CONTENT:\n").count(), 0);
    Ok(())
}
