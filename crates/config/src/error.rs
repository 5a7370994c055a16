//! Error types for parsing and querying documents.
//!
//! Responsibilities:
//! - Define error variants for parse, I/O and accessor failures.
//! - Carry enough context (line numbers, paths, keys) to act on the error.
//!
//! Does NOT handle:
//! - Deciding which errors are fatal. Nested include failures are absorbed
//!   by the inclusion resolver before they reach this type's callers.
//!
//! Invariants:
//! - `Syntax` line numbers are 1-based and relative to the document that
//!   contained the line.
//! - Accessor errors (`KeyNotFound`, `Conversion`) never imply the document
//!   was modified.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the iniconf library.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A line that is not blank, a comment, a section header or an include
    /// directive, and has no `=` separator.
    #[error("syntax error on line {line_number}: \"{line}\", expected `key = value`")]
    Syntax { line_number: usize, line: String },

    #[error("document is empty")]
    EmptyInput,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include chain that re-enters a file which is still being parsed.
    #[error("include cycle detected at {}", path.display())]
    IncludeCycle { path: PathBuf },

    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    #[error("cannot convert value \"{value}\" of key '{key}' to {target}")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },

    /// A key or value that would not read back from the serialized text:
    /// line breaks anywhere, or a key holding `=` or opening with a comment
    /// prefix.
    #[error("cannot store key '{key}': value \"{value}\" does not fit on one `key = value` line")]
    InvalidValue { key: String, value: String },

    #[error("key is empty")]
    EmptyKey,

    #[error("section '{0}' not found")]
    SectionNotFound(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error means the requested key or section is absent,
    /// as opposed to being present with an unusable value.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::KeyNotFound { .. } | ConfigError::SectionNotFound(_)
        )
    }
}
