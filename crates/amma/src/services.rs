//! Construction of the long-lived service clients.

use amma_core::AmmaConfig;
use amma_database::SupabaseClient;
use amma_error::AmmaResult;
use amma_models::{OpenAIClient, OpenAIVideoClient};
use amma_narrative::{HttpDocumentSource, PdfTextExtractor, PipelineServices};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Persistence client from configuration.
///
/// # Errors
///
/// Missing service key.
pub fn connect_store(config: &AmmaConfig) -> AmmaResult<Arc<SupabaseClient>> {
    Ok(Arc::new(SupabaseClient::from_config(&config.database)?))
}

/// Video client from configuration.
///
/// # Errors
///
/// Missing `OPENAI_API_KEY`.
pub fn connect_video(config: &AmmaConfig) -> AmmaResult<Arc<OpenAIVideoClient>> {
    Ok(Arc::new(OpenAIVideoClient::from_config(&config.openai)?))
}

/// Every client the pipeline needs, created once.
///
/// # Errors
///
/// Missing credentials, or an HTTP client that cannot be built.
#[instrument(skip(config))]
pub fn connect_services(config: &AmmaConfig) -> AmmaResult<PipelineServices> {
    let chat = Arc::new(OpenAIClient::from_config(&config.openai, &config.agent)?);
    let video = connect_video(config)?;
    let store = connect_store(config)?;
    let source = Arc::new(HttpDocumentSource::new(
        config.retrieval.download_timeout(),
    )?);

    debug!(
        pdf = PdfTextExtractor::is_available(),
        model = %config.agent.model,
        "Services connected"
    );

    Ok(PipelineServices {
        store,
        source,
        extractor: Arc::new(PdfTextExtractor),
        chat,
        video,
    })
}
