//! Named-entity recognition for candidate names.
//!
//! Recognition is a pluggable capability: `AppState` carries an
//! `Option<Arc<dyn EntityRecognizer>>`, and a missing recognizer means names are simply
//! not extracted. The bundled `HeuristicRecognizer` is a pure-Rust rule tagger tuned for
//! resume headers; any other backend only has to implement the trait.

use super::models::FieldExtractionError;

/// Characters scanned by `extract_name` when no shared annotation is supplied.
pub const NAME_SCAN_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
}

/// A tagged span; `start`/`end` are byte offsets into the recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Output of one recognition pass. Entities are in document order.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedText {
    pub entities: Vec<Entity>,
}

impl AnnotatedText {
    pub fn first_person(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.label == EntityLabel::Person)
    }
}

/// Tags entity spans in text. Implementations are shared across requests.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<AnnotatedText, FieldExtractionError>;
}

/// Returns the leading `max_chars` characters of `text` without splitting a code point.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First person entity near the top of the resume.
///
/// Reuses `annotated` when the caller already ran recognition; otherwise recognizes the
/// first `NAME_SCAN_CHARS` characters. Missing capability or recognizer failure yields `None`.
pub fn extract_name(
    text: &str,
    annotated: Option<&AnnotatedText>,
    recognizer: Option<&dyn EntityRecognizer>,
) -> Option<String> {
    let recognizer = recognizer?;

    let owned;
    let annotated = match annotated {
        Some(annotated) => annotated,
        None => match recognizer.recognize(char_prefix(text, NAME_SCAN_CHARS)) {
            Ok(result) => {
                owned = result;
                &owned
            }
            Err(e) => {
                tracing::warn!("{e}");
                return None;
            }
        },
    };

    annotated.first_person().map(|e| e.text.clone())
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicRecognizer
// ────────────────────────────────────────────────────────────────────────────

const MIN_RUN: usize = 2;
const MAX_RUN: usize = 4;

/// Tokens that end or contain an organization name.
const ORGANIZATION_WORDS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "inc", "llc", "ltd", "corp",
    "corporation", "company", "co", "group", "technologies", "labs", "systems", "solutions",
    "bank", "foundation", "gmbh",
];

/// Capitalized words that start resume headings, titles and boilerplate rather than names.
const NON_NAME_WORDS: &[&str] = &[
    // Headings
    "resume", "curriculum", "vitae", "cv", "education", "experience", "skills", "projects",
    "certifications", "awards", "summary", "objective", "profile", "contact", "references",
    "work", "history", "employment", "professional", "personal", "details", "information",
    "languages", "interests", "achievements", "publications",
    // Contact words
    "email", "e-mail", "phone", "tel", "address", "linkedin", "github", "website",
    "portfolio",
    // Titles and roles
    "senior", "junior", "lead", "principal", "staff", "chief", "head", "software", "engineer",
    "engineering", "developer", "manager", "analyst", "intern", "consultant", "architect",
    "designer", "director", "scientist", "specialist", "administrator", "associate",
    "assistant", "officer", "full", "stack", "frontend", "backend", "data", "web", "mobile",
    "cloud", "devops", "product", "project", "marketing", "sales",
    // Degrees and fields
    "bachelor", "master", "doctor", "science", "arts", "technology", "computer", "business",
    "administration", "mathematics", "physics",
    // Skills that look like proper nouns
    "machine", "learning", "deep", "vision", "power", "microsoft", "google", "amazon",
    // Dates and places
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "present", "current", "street", "road", "avenue",
    "city", "state",
    // Function words capitalized at line starts
    "the", "and", "of", "for", "in", "at", "with", "to", "a", "an", "my", "i",
];

/// Rule-based recognizer: runs of 2–4 capitalized alphabetic tokens on one line.
///
/// A run ends at any token that is not name-shaped, at punctuation attached to a token
/// (`,` `|` `:` `;`), or at a word from `NON_NAME_WORDS`. Runs containing an organization
/// word are tagged `Organization`; the rest are `Person`.
#[derive(Debug, Clone, Default)]
pub struct HeuristicRecognizer;

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    /// Punctuation followed the token, so no run may continue past it.
    closes_run: bool,
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Result<AnnotatedText, FieldExtractionError> {
        let mut entities = Vec::new();
        let mut line_start = 0;

        for line in text.split('\n') {
            let mut run: Vec<Token> = Vec::new();
            for token in tokenize(line, line_start) {
                let lowered = token.text.to_lowercase();
                let name_shaped = is_name_shaped(token.text)
                    && !NON_NAME_WORDS.contains(&lowered.trim_end_matches('.'));

                if name_shaped {
                    run.push(token);
                    if token.closes_run {
                        flush_run(text, &mut run, &mut entities);
                    }
                } else {
                    flush_run(text, &mut run, &mut entities);
                }
            }
            flush_run(text, &mut run, &mut entities);
            line_start += line.len() + 1;
        }

        Ok(AnnotatedText { entities })
    }
}

fn tokenize(line: &str, offset: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for piece in line.split_whitespace() {
        let at = cursor + line[cursor..].find(piece).unwrap_or(0);
        cursor = at + piece.len();

        let word = piece.trim_end_matches([',', '|', ':', ';', '•']);
        let closes_run = word.len() != piece.len();
        let word = word.trim_start_matches(['(', '"', '•']);
        if word.is_empty() {
            // A bare separator between words still breaks the run.
            tokens.push(Token {
                text: "",
                start: offset + at,
                end: offset + at,
                closes_run: true,
            });
            continue;
        }
        let lead = piece.find(word).unwrap_or(0);
        tokens.push(Token {
            text: word,
            start: offset + at + lead,
            end: offset + at + lead + word.len(),
            closes_run,
        });
    }

    tokens
}

/// Capitalized alphabetic word (`O'Neil`, `Smith-Jones`, `JOHN`) or an initial (`J.`).
fn is_name_shaped(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }

    let rest: Vec<char> = chars.collect();
    if rest == ['.'] {
        return true;
    }
    !rest.is_empty()
        && rest.iter().all(|c| c.is_alphabetic() || matches!(*c, '-' | '\''))
        && rest.last().is_some_and(|c| c.is_alphabetic())
}

fn flush_run(text: &str, run: &mut Vec<Token>, entities: &mut Vec<Entity>) {
    if (MIN_RUN..=MAX_RUN).contains(&run.len()) {
        let start = run[0].start;
        let end = run[run.len() - 1].end;
        let is_org = run
            .iter()
            .any(|t| ORGANIZATION_WORDS.contains(&t.text.to_lowercase().trim_end_matches('.')));

        entities.push(Entity {
            text: text[start..end].to_string(),
            label: if is_org {
                EntityLabel::Organization
            } else {
                EntityLabel::Person
            },
            start,
            end,
        });
    }
    run.clear();
}
