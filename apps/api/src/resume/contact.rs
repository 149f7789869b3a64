//! Contact extraction — email and phone via fixed regular expressions.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is valid")
});

/// Tried in order; the first pattern with any match wins, even when a later pattern
/// would match earlier in the text.
// NOTE: the most permissive pattern comes first, so a bare year such as "2019" can be
// returned before a real number further down. Kept as-is for output compatibility.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // International, optional country code and separators.
        r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}",
        // Parenthesized area code.
        r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        // Plain separator-delimited groups.
        r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("phone pattern is valid"))
    .collect()
});

/// Returns the first email address in document order.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Returns the first match of the first phone pattern that matches anywhere in the text.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}
