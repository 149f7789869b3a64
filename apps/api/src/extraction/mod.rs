// Document text extraction: turns an uploaded PDF or DOCX into one linear text stream.
// Format-specific decoding lives in `pdf` and `docx`; this module owns dispatch and the
// readability check applied before parsing.

pub mod docx;
pub mod pdf;

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

/// Minimum number of characters (after trimming) for extracted text to be parseable.
pub const MIN_READABLE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Derives the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, DocumentError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            other => Err(DocumentError::UnsupportedFormat(
                other.map(|e| format!(".{e}")).unwrap_or_default(),
            )),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("PDF"),
            DocumentFormat::Docx => f.write_str("DOCX"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text from {format}: {reason}")]
    Extraction {
        format: DocumentFormat,
        reason: String,
    },

    #[error("Extracted text has {chars} readable characters (minimum {})", MIN_READABLE_CHARS)]
    UnreadableContent { chars: usize },
}

impl DocumentError {
    pub(crate) fn extraction(format: DocumentFormat, reason: impl fmt::Display) -> Self {
        DocumentError::Extraction {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Uploaded document bytes plus the format declared by the upload's filename.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub content: Bytes,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(content: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }
}

/// Extracts the linearized text of a document, dispatching on its declared format.
pub fn extract_text(document: &RawDocument) -> Result<String, DocumentError> {
    match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(&document.content),
        DocumentFormat::Docx => docx::extract_docx_text(&document.content),
    }
}

/// Rejects text too short to be a real resume (image-only scans, empty documents).
pub fn ensure_readable(text: &str) -> Result<&str, DocumentError> {
    let chars = text.trim().chars().count();
    if chars < MIN_READABLE_CHARS {
        return Err(DocumentError::UnreadableContent { chars });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_filename("resume.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("Jane Doe CV.Docx").unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = DocumentFormat::from_filename("resume.doc").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ref ext) if ext == ".doc"));

        let err = DocumentFormat::from_filename("resume").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_five_characters_is_unreadable() {
        let err = ensure_readable("  Hello  \n").unwrap_err();
        assert!(matches!(err, DocumentError::UnreadableContent { chars: 5 }));
    }

    #[test]
    fn test_whitespace_only_is_unreadable() {
        assert!(matches!(
            ensure_readable("\n\n   \t"),
            Err(DocumentError::UnreadableContent { chars: 0 })
        ));
    }

    #[test]
    fn test_ten_characters_is_readable() {
        assert!(ensure_readable("  abcdefghij ").is_ok());
    }

    #[test]
    fn test_extract_text_dispatches_on_declared_format() {
        let docx = docx::tests::build_docx(&["Jane Doe", "Rust developer"]);
        let doc = RawDocument::new(docx.clone(), DocumentFormat::Docx);
        assert_eq!(extract_text(&doc).unwrap(), "Jane Doe\nRust developer\n");

        // The same bytes declared as PDF go through the PDF decoder and fail there.
        let doc = RawDocument::new(docx, DocumentFormat::Pdf);
        assert!(matches!(
            extract_text(&doc),
            Err(DocumentError::Extraction {
                format: DocumentFormat::Pdf,
                ..
            })
        ));
    }
}
