//! PDF text recovery via `pdf-extract`.
//!
//! Pages are decoded in document order and their text concatenated without an extra
//! separator. The decoder owns the parsed document only for the duration of the call.

use std::panic;

use tracing::debug;

use super::{DocumentError, DocumentFormat};

pub fn extract_pdf_text(content: &[u8]) -> Result<String, DocumentError> {
    // pdf-extract panics on some malformed content streams instead of returning an error.
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content));

    match outcome {
        Ok(Ok(text)) => {
            debug!("Recovered {} characters from PDF", text.len());
            Ok(text)
        }
        Ok(Err(e)) => Err(DocumentError::extraction(DocumentFormat::Pdf, e)),
        Err(_) => Err(DocumentError::extraction(
            DocumentFormat::Pdf,
            "decoder aborted on malformed content",
        )),
    }
}
