//! Output sanitizer — turns free-form model text into the requested shape.
//!
//! Models prepend commentary, number their alternatives and decorate with
//! markdown even when told not to. Everything here degrades to an empty
//! string instead of failing; the orchestrator reports empty as an error.

use crate::content::ContentType;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[#>*\-•–—]+\s+").expect("Invalid leading marker regex")
});

static ORDINAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+").expect("Invalid ordinal regex"));

static OUTER_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^['"“”](.*)['"“”]$"#).expect("Invalid outer quotes regex")
});

static OPTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^option\s*\d+[:\-]?\s*").expect("Invalid option label regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid whitespace regex"));

/// Tunable heuristics for the sanitizer.
#[derive(Debug, Clone)]
pub struct SanitizeLimits {
    /// Maximum number of lines kept for list content.
    pub max_list_lines: usize,
    /// Characters stripped from the end of a headline.
    pub headline_trailing: Vec<char>,
}

impl Default for SanitizeLimits {
    fn default() -> Self {
        Self {
            max_list_lines: 5,
            headline_trailing: vec!['.', '!', '?', ';', ':'],
        }
    }
}

/// Sanitize raw model output with the default limits.
pub fn sanitize(content_type: ContentType, raw: &str) -> String {
    sanitize_with(content_type, raw, &SanitizeLimits::default())
}

/// Sanitize raw model output for `content_type`.
///
/// Returns an empty string when nothing usable survives.
pub fn sanitize_with(content_type: ContentType, raw: &str, limits: &SanitizeLimits) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut candidates = text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(strip_until_stable)
        // A bare "Option N" line is consumed whole by OPTION_LABEL.
        .filter(|l| !l.is_empty());

    if content_type.is_list() {
        return candidates
            .take(limits.max_list_lines)
            .collect::<Vec<_>>()
            .join("\n");
    }

    match candidates.next() {
        Some(first) => finish_single_line(content_type, first, limits),
        None => String::new(),
    }
}

/// One pass of markdown and label stripping over a single line.
fn strip_line(line: &str) -> String {
    let t = LEADING_MARKER.replace(line, "");
    let t = ORDINAL_MARKER.replace(&t, "");
    let t = t.replace(['*', '_', '`'], "");
    let t = OUTER_QUOTES.replace(&t, "$1");
    let t = OPTION_LABEL.replace(&t, "");
    t.trim().to_string()
}

/// Every pass either shortens the line or leaves it unchanged, so this
/// terminates.
fn strip_until_stable(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = strip_line(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn finish_single_line(content_type: ContentType, line: String, limits: &SanitizeLimits) -> String {
    let mut current = line;
    loop {
        let mut next = strip_line(&current);
        if content_type.is_headline() {
            next = next
                .trim_end_matches(|c: char| c.is_whitespace() || limits.headline_trailing.contains(&c))
                .to_string();
        }
        let next = WHITESPACE_RUN.replace_all(&next, " ").trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}
