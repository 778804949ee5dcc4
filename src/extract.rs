//! Text extraction for source documents.
//!
//! Extraction is pipeline-layer: the document store supplies bytes, this
//! module returns plain UTF-8 text for prompting. The extracted text is
//! derived state and never persisted.

use crate::error::Error;

/// Supported MIME type. The document store only lists PDF files, so this
/// is the whole extraction surface for now.
pub const MIME_PDF: &str = "application/pdf";

/// Extracts plain text from binary content.
pub fn extract_text(bytes: &[u8], content_type: &str) -> Result<String, Error> {
    match content_type {
        MIME_PDF => extract_pdf(bytes),
        _ => Err(Error::Extract(format!(
            "unsupported content-type: {}",
            content_type
        ))),
    }
}

/// Extracts plain text from a PDF document.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, Error> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| Error::Extract(format!("PDF extraction failed: {}", e)))
}
