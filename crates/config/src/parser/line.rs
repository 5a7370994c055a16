//! Classification of a single trimmed line.
//!
//! Precedence: blank, comment, section header, then the `=` split. A line
//! without `=` is an include directive only if it starts with `include `
//! (case-sensitive) and has exactly two whitespace-separated tokens.

use crate::constants::{
    ASSIGNMENT, COMMENT_PREFIXES, INCLUDE_KEYWORD, INCLUDE_PREFIX, QUOTE, SECTION_END,
    SECTION_START,
};
use crate::document::{key_name, section_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Comment(&'a str),
    /// Normalized section name.
    Section(String),
    /// Include target with surrounding quotes removed.
    Include(&'a str),
    KeyValue { key: String, value: String },
    /// Anything the grammar does not accept.
    Invalid,
}

/// Classify `line`, which the caller has already trimmed.
pub(crate) fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(COMMENT_PREFIXES) {
        return Line::Comment(line);
    }
    if line.len() >= 2 && line.starts_with(SECTION_START) && line.ends_with(SECTION_END) {
        return Line::Section(section_name(&line[1..line.len() - 1]));
    }

    match line.split_once(ASSIGNMENT) {
        Some((key, value)) => Line::KeyValue {
            key: key_name(key),
            value: unquote_value(value.trim()),
        },
        None if line.starts_with(INCLUDE_PREFIX) => classify_include(line),
        None => Line::Invalid,
    }
}

fn classify_include(line: &str) -> Line<'_> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(INCLUDE_KEYWORD), Some(target), None) => Line::Include(target.trim_matches(QUOTE)),
        _ => Line::Invalid,
    }
}

/// A value that opens with a quote loses every quote character it contains.
fn unquote_value(value: &str) -> String {
    if value.starts_with(QUOTE) {
        value.replace(QUOTE, "")
    } else {
        value.to_string()
    }
}
