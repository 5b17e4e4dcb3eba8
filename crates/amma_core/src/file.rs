//! Patient file records stored by the persistence service.

use serde::{Deserialize, Serialize};

/// Extension (lowercase) of records whose content is downloaded and read.
pub const DOCUMENT_EXTENSION: &str = ".pdf";

/// Kind of a stored patient file.
///
/// Values other than `file` and `video` are kept verbatim so they can be
/// shown as stored.
///
/// # Examples
///
/// ```
/// use amma_core::FileType;
///
/// let kind: FileType = serde_json::from_str(r#""image""#).unwrap();
/// assert_eq!(kind, FileType::Other("image".to_string()));
/// assert_eq!(kind.to_string(), "image");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    /// An uploaded document
    #[display("file")]
    File,
    /// A generated or uploaded video, only ever referenced by URL
    #[display("video")]
    Video,
    /// Any other stored value
    #[display("{_0}")]
    Other(String),
}

impl From<String> for FileType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "file" => FileType::File,
            "video" => FileType::Video,
            _ => FileType::Other(value),
        }
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        match value {
            FileType::Other(other) => other,
            known => known.to_string(),
        }
    }
}

/// One row of the `patient_files` table.
///
/// Only `patient_email` is guaranteed; every other column may be null or
/// absent and is rendered with a placeholder by the retriever.
///
/// # Examples
///
/// ```
/// use amma_core::{FileRecord, FileType};
///
/// let record: FileRecord = serde_json::from_str(
///     r#"{"patient_email":"pat@example.com","file_name":"Labs.PDF","file_type":"file"}"#,
/// ).unwrap();
///
/// assert_eq!(record.file_type, Some(FileType::File));
/// assert!(record.is_document());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Patient identifier (email)
    #[serde(default)]
    pub patient_email: String,
    /// Uploading doctor's email
    #[serde(default)]
    pub doctor_email: Option<String>,
    /// Display name of the file
    #[serde(default)]
    pub file_name: Option<String>,
    /// Kind of file
    #[serde(default)]
    pub file_type: Option<FileType>,
    /// Public URL of the content
    #[serde(default)]
    pub file_url: Option<String>,
    /// Creation timestamp as rendered by the service
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FileRecord {
    /// Whether this record's content should be downloaded and read as text.
    ///
    /// True only for `file` records whose name ends in `.pdf`, ignoring case.
    pub fn is_document(&self) -> bool {
        self.file_type == Some(FileType::File)
            && self
                .file_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().ends_with(DOCUMENT_EXTENSION))
    }
}

/// A row to insert into `patient_files` for a generated video.
///
/// The type is always [`FileType::Video`]; `created_at` is left to the
/// service default.
///
/// # Examples
///
/// ```
/// use amma_core::{FileType, NewFileRecord};
///
/// let record = NewFileRecord::generated_video(
///     "pat@example.com",
///     "doc@example.com",
///     "https://videos.example.com/abc.mp4",
/// );
///
/// assert_eq!(*record.file_type(), FileType::Video);
/// assert_eq!(record.file_name(), "AI Generated Video - pat@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct NewFileRecord {
    doctor_email: String,
    patient_email: String,
    file_type: FileType,
    file_url: String,
    file_name: String,
}

impl NewFileRecord {
    /// Build the record linking a generated video to a patient/doctor pair.
    pub fn generated_video(
        patient_email: impl Into<String>,
        doctor_email: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        let patient_email = patient_email.into();
        Self {
            file_name: format!("AI Generated Video - {patient_email}"),
            doctor_email: doctor_email.into(),
            patient_email,
            file_type: FileType::Video,
            file_url: video_url.into(),
        }
    }
}
