//! HTTP download of document content.

use amma_error::{AmmaResult, DocumentError, DocumentErrorKind, HttpError};
use amma_interface::DocumentSource;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Downloads documents over HTTP with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    /// Creates a source whose downloads give up after `timeout`.
    pub fn new(timeout: Duration) -> AmmaResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build download client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DocumentSource for HttpDocumentSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentError> {
        let download_error = |e: reqwest::Error| {
            warn!(error = %e, "Download failed");
            DocumentError::new(DocumentErrorKind::Download(e.to_string()))
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(download_error)?
            .error_for_status()
            .map_err(download_error)?;

        let bytes = response.bytes().await.map_err(download_error)?;
        debug!(bytes = bytes.len(), "Downloaded document");
        Ok(bytes.to_vec())
    }
}
