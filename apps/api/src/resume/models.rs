use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of education lines kept per resume.
pub const MAX_EDUCATION_ENTRIES: usize = 10;
/// Maximum number of experience lines kept per resume.
pub const MAX_EXPERIENCE_ENTRIES: usize = 15;

/// Best-effort structured summary of a resume. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Catalog skills found in the text, sorted alphabetically.
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
}

/// A single heuristic extractor failed. Degrades that field only; never fails a parse.
#[derive(Debug, Clone, Error)]
#[error("{field} extraction failed: {reason}")]
pub struct FieldExtractionError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldExtractionError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
