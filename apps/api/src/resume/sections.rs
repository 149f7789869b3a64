//! Section extraction — education and experience blocks found by line scanning.
//!
//! Both extractors run the same two-state machine over `text.split('\n')`:
//!
//! - A line whose lowercased, trimmed form *contains* a header keyword is consumed in
//!   either state and leaves the scanner `Inside`. Header lines are never emitted.
//! - `Inside` → stop when the lowercased, trimmed line *equals* a sibling section name.
//!   Nothing after the stop line is examined.
//! - While `Inside`, each other non-blank line is offered to the section's emission rule
//!   and kept (trimmed) when accepted, up to the section's cap.
//!
//! There is no resuming after a stop.

use super::models::{MAX_EDUCATION_ENTRIES, MAX_EXPERIENCE_ENTRIES};

const EDUCATION_HEADERS: &[&str] = &["education", "academic", "university", "college", "school"];
const EDUCATION_STOPS: &[&str] = &[
    "experience",
    "work experience",
    "skills",
    "projects",
    "certifications",
];
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "b.tech", "m.tech", "b.sc", "m.sc", "mba", "bba", "degree",
    "diploma",
];
const INSTITUTION_KEYWORDS: &[&str] = &["university", "college", "institute"];

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional experience",
];
const EXPERIENCE_STOPS: &[&str] = &["education", "skills", "projects", "certifications", "awards"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
}

/// A line under consideration while inside a section.
#[derive(Debug)]
struct SectionLine<'a> {
    trimmed: &'a str,
    lowered: String,
    is_last: bool,
}

struct SectionRules {
    headers: &'static [&'static str],
    stops: &'static [&'static str],
    cap: usize,
    accept: fn(&SectionLine) -> bool,
}

const EDUCATION: SectionRules = SectionRules {
    headers: EDUCATION_HEADERS,
    stops: EDUCATION_STOPS,
    cap: MAX_EDUCATION_ENTRIES,
    accept: accept_education_line,
};

const EXPERIENCE: SectionRules = SectionRules {
    headers: EXPERIENCE_HEADERS,
    stops: EXPERIENCE_STOPS,
    cap: MAX_EXPERIENCE_ENTRIES,
    accept: accept_experience_line,
};

/// Education lines following the first education-like header.
pub fn extract_education(text: &str) -> Vec<String> {
    scan_section(text, &EDUCATION)
}

/// Experience lines following the first experience-like header.
pub fn extract_experience(text: &str) -> Vec<String> {
    scan_section(text, &EXPERIENCE)
}

fn scan_section(text: &str, rules: &SectionRules) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_index = lines.len().saturating_sub(1);

    let mut state = ScanState::Outside;
    let mut entries = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();

        if rules.headers.iter().any(|h| lowered.contains(h)) {
            state = ScanState::Inside;
            continue;
        }

        match state {
            ScanState::Outside => {}
            ScanState::Inside => {
                if rules.stops.contains(&lowered.as_str()) {
                    break;
                }
                if trimmed.is_empty() || entries.len() >= rules.cap {
                    continue;
                }
                let line = SectionLine {
                    trimmed,
                    lowered,
                    is_last: index == last_index,
                };
                if (rules.accept)(&line) {
                    entries.push(line.trimmed.to_string());
                }
            }
        }
    }

    entries
}

fn accept_education_line(line: &SectionLine) -> bool {
    if DEGREE_KEYWORDS.iter().any(|k| line.lowered.contains(k)) {
        return true;
    }
    line.trimmed.chars().count() > 10
        && !line.is_last
        && (line.trimmed.chars().any(char::is_numeric)
            || INSTITUTION_KEYWORDS.iter().any(|k| line.lowered.contains(k)))
}

fn accept_experience_line(line: &SectionLine) -> bool {
    line.trimmed.chars().count() > 5
}
