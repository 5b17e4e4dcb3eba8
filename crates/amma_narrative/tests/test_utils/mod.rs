//! Test utilities for narrative tests.
//!
//! This module provides mock services and record helpers.

#![allow(dead_code)]

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::{
    MockChatDriver, MockDocumentSource, MockFileStore, MockVideoGenerator, StubExtractor,
};

use amma_core::{FileRecord, FileType, PromptConfig, VideoJob, VideoOutput, VideoStatus};
use amma_narrative::VideoSettings;
use std::time::Duration;

/// A `file` record with the given name and URL.
pub fn document_record(patient: &str, name: &str, url: &str) -> FileRecord {
    FileRecord {
        patient_email: patient.to_string(),
        doctor_email: Some("doc@example.com".to_string()),
        file_name: Some(name.to_string()),
        file_type: Some(FileType::File),
        file_url: Some(url.to_string()),
        created_at: Some("2025-01-15T10:30:00+00:00".to_string()),
    }
}

/// A `video` record with the given URL.
pub fn video_record(patient: &str, url: &str) -> FileRecord {
    FileRecord {
        patient_email: patient.to_string(),
        doctor_email: Some("doc@example.com".to_string()),
        file_name: Some(format!("AI Generated Video - {patient}")),
        file_type: Some(FileType::Video),
        file_url: Some(url.to_string()),
        created_at: Some("2025-02-01T08:00:00+00:00".to_string()),
    }
}

/// Job snapshot with the given status and no output.
pub fn job(status: VideoStatus) -> VideoJob {
    VideoJob {
        id: "video_123".to_string(),
        status,
        output: None,
        error: None,
        progress: None,
    }
}

/// Completed job snapshot carrying `url`.
pub fn completed_job(url: &str) -> VideoJob {
    VideoJob {
        output: Some(VideoOutput {
            url: url.to_string(),
        }),
        ..job(VideoStatus::Completed)
    }
}

/// Settings that poll every millisecond.
pub fn fast_settings(max_attempts: u32) -> VideoSettings {
    VideoSettings {
        model: "sora-2".to_string(),
        size: "1280x720".to_string(),
        seconds: "12".to_string(),
        poll_interval: Duration::from_millis(1),
        max_attempts,
        prompt: PromptConfig::default(),
    }
}
