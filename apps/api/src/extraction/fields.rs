//! Regex heuristics for the candidate's display name and email address.
//!
//! These are tuned for common Western resume headers and nothing more.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned by [`extract_name`] when there is no text at all.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Only the head of a resume is searched for a name.
const NAME_SCAN_LINES: usize = 10;

static NAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-zA-Z'-]+\s){1,2}[A-Z][a-zA-Z'-]+$").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").unwrap());

/// First title-cased two- or three-word line among the first non-empty lines,
/// else the first non-empty line, else [`UNKNOWN_NAME`].
pub fn extract_name(text: &str) -> String {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let Some(first) = lines.next() else {
        return UNKNOWN_NAME.to_string();
    };

    std::iter::once(first)
        .chain(lines)
        .take(NAME_SCAN_LINES)
        .find(|line| NAME_LINE.is_match(line))
        .unwrap_or(first)
        .to_string()
}

/// First `local@domain` substring anywhere in `text`.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}
