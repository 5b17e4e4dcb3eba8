//! PDF text extraction.
//!
//! Without the `pdf` feature every extraction reports
//! [`DocumentErrorKind::ReaderUnavailable`], which the retriever renders as
//! an inline notice.

use amma_error::{DocumentError, DocumentErrorKind};
use amma_interface::{ExtractedDocument, TextExtractor};
use tracing::{debug, instrument};

/// Extracts page text from PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Whether a PDF backend was compiled in.
    pub const fn is_available() -> bool {
        cfg!(feature = "pdf")
    }
}

impl TextExtractor for PdfTextExtractor {
    #[cfg(feature = "pdf")]
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, DocumentError> {
        let extraction_error =
            |e: lopdf::Error| DocumentError::new(DocumentErrorKind::Extraction(e.to_string()));

        let document = lopdf::Document::load_mem(bytes).map_err(extraction_error)?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!(pages = page_numbers.len(), "Extracting text from pages");

        let pages = page_numbers
            .iter()
            .map(|page| document.extract_text(&[*page]).map_err(extraction_error))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            chars = pages.iter().map(|page| page.len()).sum::<usize>(),
            "Extracted PDF text"
        );
        Ok(ExtractedDocument { pages })
    }

    #[cfg(not(feature = "pdf"))]
    #[instrument(skip(self, _bytes))]
    fn extract(&self, _bytes: &[u8]) -> Result<ExtractedDocument, DocumentError> {
        debug!("PDF support not compiled in");
        Err(DocumentError::new(DocumentErrorKind::ReaderUnavailable))
    }
}
