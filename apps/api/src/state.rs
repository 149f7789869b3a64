use crate::config::Config;
use crate::resume::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the process-wide skills catalog and the optional entity recognizer.
    /// Both are read-only after startup, so requests share them without locking.
    pub parser: ResumeParser,
}
