//! Section and key name normalization at the API boundary.

use crate::constants::{COMPOUND_KEY_SEPARATOR, DEFAULT_SECTION};

/// Trimmed, lower-cased section name; empty means `default`.
pub(crate) fn section_name(section: &str) -> String {
    let section = section.trim().to_lowercase();
    if section.is_empty() {
        DEFAULT_SECTION.to_string()
    } else {
        section
    }
}

/// Trimmed, lower-cased key name.
pub(crate) fn key_name(key: &str) -> String {
    key.trim().to_lowercase()
}

/// A `section::key` address resolved into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPath {
    pub section: String,
    pub key: String,
}

impl KeyPath {
    /// Split a bare or compound key on the first `::`.
    pub(crate) fn parse(key: &str) -> Self {
        match key.split_once(COMPOUND_KEY_SEPARATOR) {
            Some((section, key)) => Self {
                section: section_name(section),
                key: key_name(key),
            },
            None => Self {
                section: DEFAULT_SECTION.to_string(),
                key: key_name(key),
            },
        }
    }
}
