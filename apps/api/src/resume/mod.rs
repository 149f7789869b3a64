// Resume parsing: heuristic field extractors over extracted text plus the upload endpoint.
// Extractors are pure functions; shared inputs (skills catalog, entity recognizer) are
// read-only after startup and live in `parser::ResumeParser`.

pub mod contact;
pub mod handlers;
pub mod models;
pub mod ner;
pub mod parser;
pub mod sections;
pub mod skills;
