//! Resume parser — runs every field extractor over extracted text and assembles the result.
//!
//! Extractors are pure functions of the text plus read-only shared data (catalog,
//! recognizer), so their order does not matter. Each runs behind `guarded`: an error or a
//! panic inside one extractor degrades that field to absent/empty and the parse continues.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use super::contact::{extract_email, extract_phone};
use super::models::{FieldExtractionError, ParsedResume};
use super::ner::{char_prefix, extract_name, EntityRecognizer};
use super::sections::{extract_education, extract_experience};
use super::skills::{extract_skills, SkillsCatalog};

/// Characters covered by the single recognition pass shared with name extraction.
pub const SHARED_NER_CHARS: usize = 2000;

#[derive(Clone)]
pub struct ResumeParser {
    catalog: Arc<SkillsCatalog>,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl ResumeParser {
    pub fn new(catalog: Arc<SkillsCatalog>, recognizer: Option<Arc<dyn EntityRecognizer>>) -> Self {
        Self {
            catalog,
            recognizer,
        }
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn catalog(&self) -> &SkillsCatalog {
        &self.catalog
    }

    /// Parses resume text into structured fields. Never fails.
    pub fn parse(&self, text: &str) -> ParsedResume {
        let recognizer = self.recognizer.as_deref();

        // One recognition pass; a failed pass leaves the name absent rather than retrying.
        let annotated = recognizer.and_then(|r| {
            guarded("name", || r.recognize(char_prefix(text, SHARED_NER_CHARS)))
        });
        let name = annotated
            .as_ref()
            .and_then(|a| extract_name(text, Some(a), recognizer));

        ParsedResume {
            name,
            email: guarded("email", || Ok(extract_email(text))).flatten(),
            phone: guarded("phone", || Ok(extract_phone(text))).flatten(),
            skills: guarded("skills", || Ok(extract_skills(text, &self.catalog)))
                .unwrap_or_default(),
            education: guarded("education", || Ok(extract_education(text))).unwrap_or_default(),
            experience: guarded("experience", || Ok(extract_experience(text)))
                .unwrap_or_default(),
        }
    }
}

/// Runs one field extractor, converting errors and panics into a logged `None`.
fn guarded<T>(
    field: &'static str,
    extract: impl FnOnce() -> Result<T, FieldExtractionError>,
) -> Option<T> {
    let error = match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e,
        Err(payload) => FieldExtractionError::new(field, panic_message(payload.as_ref())),
    };
    warn!(field = field, "{error}");
    None
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "extractor panicked".to_string()
    }
}
