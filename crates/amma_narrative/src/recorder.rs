//! Persisting generated video links.

use amma_core::NewFileRecord;
use amma_interface::PatientFileStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Writes one record per generated video.
#[derive(Clone)]
pub struct ResultRecorder {
    store: Arc<dyn PatientFileStore>,
}

impl ResultRecorder {
    /// Creates a recorder writing to `store`.
    pub fn new(store: Arc<dyn PatientFileStore>) -> Self {
        Self { store }
    }

    /// Link `video_url` to the patient and doctor.
    ///
    /// Returns whether the service echoed the row back. Failures are
    /// logged, never returned.
    #[instrument(skip(self, video_url))]
    pub async fn record(&self, patient_email: &str, doctor_email: &str, video_url: &str) -> bool {
        let record = NewFileRecord::generated_video(patient_email, doctor_email, video_url);

        match self.store.insert_file(&record).await {
            Ok(rows) if !rows.is_empty() => {
                info!("Video URL saved to database");
                true
            }
            Ok(_) => {
                warn!("Insert succeeded but no row was returned");
                false
            }
            Err(e) => {
                warn!(error = %e, "Could not save video record");
                false
            }
        }
    }
}

impl std::fmt::Debug for ResultRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultRecorder").finish_non_exhaustive()
    }
}
