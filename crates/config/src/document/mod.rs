//! The in-memory document model.
//!
//! Responsibilities:
//! - Own the section → key → entry mapping, section comments and the
//!   trailing comment behind a reader/writer lock.
//! - Expose structural mutators (`add_entry`, `set`, `delete_key`,
//!   `delete_section`, `add_section`) and persistence (`save_file`).
//!
//! Does NOT handle:
//! - Typed reads (see `accessors.rs`).
//! - Text rendering (see `serialize.rs`) or combining documents (see `merge.rs`).
//! - Parsing (see `crate::parser`).
//!
//! Invariants:
//! - Section names and keys are stored trimmed and lower-cased; an empty
//!   section name is stored as `default`.
//! - A section exists once a key is added to it, `add_section` is called, or
//!   a header for it is parsed. Removing its last key keeps it.
//! - Readers take the shared lock, mutators the exclusive lock. A poisoned
//!   lock is recovered since every mutation leaves the maps consistent.

mod accessors;
mod entry;
mod key;
mod merge;
mod serialize;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::constants::{ASSIGNMENT, COMMENT_PREFIXES};
use crate::error::ConfigError;
use crate::parser::Parser;
use crate::source::{ByteSink, ByteSource, FsSink, FsSource};

pub use entry::{Entries, Entry};
pub use merge::merge_optional;

pub(crate) use key::{KeyPath, key_name, section_name};

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// True when `section`, `key` and `value` serialize to lines that parse back
/// to the same entry.
fn is_storable(section: &str, key: &str, value: &str) -> bool {
    !has_line_break(section)
        && !has_line_break(key)
        && !has_line_break(value)
        && !key.contains(ASSIGNMENT)
        && !key.starts_with(COMMENT_PREFIXES)
}

/// Unsynchronized document state. Parsing builds one of these privately
/// before it is wrapped in a `Document`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Model {
    pub(crate) sections: BTreeMap<String, Entries>,
    pub(crate) section_comments: BTreeMap<String, String>,
    pub(crate) trailing_comment: String,
    /// Paths of the files folded in through include directives.
    pub(crate) included: BTreeSet<PathBuf>,
}

impl Model {
    pub(crate) fn section_mut(&mut self, section: &str) -> &mut Entries {
        self.sections.entry(section.to_string()).or_default()
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        self.section_mut(entry.section()).insert(entry);
    }

    pub(crate) fn lookup(&self, path: &KeyPath) -> Option<&Entry> {
        self.sections.get(&path.section)?.get(&path.key)
    }

    /// Fold an included document into this one.
    ///
    /// Unknown sections are adopted whole; known sections take the included
    /// entries, which win on key collisions. Section comments are only
    /// adopted where this document has none.
    pub(crate) fn absorb(&mut self, included: Model) {
        for (name, entries) in included.sections {
            match self.sections.entry(name) {
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(entries);
                }
                std::collections::btree_map::Entry::Occupied(mut slot) => {
                    slot.get_mut().extend(entries);
                }
            }
        }
        for (name, comment) in included.section_comments {
            self.section_comments.entry(name).or_insert(comment);
        }
        self.included.extend(included.included);
    }
}

/// A parsed (or programmatically built) configuration document.
///
/// All methods take `&self`; share a document across threads with `Arc`.
///
/// ```
/// use iniconf::Document;
///
/// let doc = Document::parse(b"name = demo\n[web]\nport = 8080\n").unwrap();
/// assert_eq!(doc.get_string("name").unwrap(), "demo");
/// assert_eq!(doc.default_int("web::port", 0), 8080);
///
/// doc.set("web::port", "9090").unwrap();
/// assert_eq!(doc.get_int("WEB::PORT").unwrap(), 9090);
/// ```
#[derive(Default)]
pub struct Document {
    model: RwLock<Model>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_model(model: Model) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Model> {
        self.model.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Model> {
        self.model.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parse a whole document held in memory.
    ///
    /// Relative include paths resolve against the current directory.
    pub fn parse(data: &[u8]) -> Result<Self, ConfigError> {
        Parser::new(&FsSource).parse(data)
    }

    /// Load and parse a file from disk, following its includes.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Parser::new(&FsSource).parse_file(path.as_ref())
    }

    /// Load and parse a file through a custom byte source.
    pub fn load_with(source: &dyn ByteSource, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Parser::new(source).parse_file(path.as_ref())
    }

    /// Insert or replace `key` in `section`.
    ///
    /// All inputs are trimmed; an empty section means `default`. The value is
    /// classified as an environment expression when it is one. An entry that
    /// would not survive a save and reload (see `set`) is logged and ignored.
    pub fn add_entry(&self, section: &str, key: &str, value: &str) -> &Self {
        let (section, key, value) = (section_name(section), key_name(key), value.trim());
        if !is_storable(&section, &key, value) {
            tracing::warn!(section = %section, key = %key, "Ignoring entry that cannot be serialized");
            return self;
        }
        let entry = Entry::new(section, key, value, "");
        self.write().insert(entry);
        self
    }

    /// Insert or replace the value addressed by a bare or `section::key` key.
    ///
    /// The target section is created if needed. Like `add_entry`, the value
    /// is classified as an environment expression. Line breaks in any part,
    /// or a key containing `=` or starting with a comment prefix, give
    /// `InvalidValue`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let path = KeyPath::parse(key);
        if path.key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if !is_storable(&path.section, &path.key, value) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        let entry = Entry::new(path.section, path.key, value, "");
        self.write().insert(entry);
        Ok(())
    }

    /// Remove `key` from `section`. Returns whether the key existed.
    pub fn delete_key(&self, section: &str, key: &str) -> bool {
        let section = section_name(section);
        let key = key_name(key);
        self.write()
            .sections
            .get_mut(&section)
            .and_then(|entries| entries.remove(&key))
            .is_some()
    }

    /// Remove a section with all its keys. Returns whether it existed.
    pub fn delete_section(&self, section: &str) -> bool {
        let section = section_name(section);
        let mut model = self.write();
        model.section_comments.remove(&section);
        model.sections.remove(&section).is_some()
    }

    /// Ensure `section` exists.
    pub fn add_section(&self, section: &str) -> &Self {
        let section = section_name(section);
        self.write().section_mut(&section);
        self
    }

    /// Attach (or with an empty string, clear) the comment printed above a
    /// section header. The section is created if needed.
    pub fn set_section_comment(&self, section: &str, comment: &str) -> &Self {
        let section = section_name(section);
        let mut model = self.write();
        model.section_mut(&section);
        if comment.is_empty() {
            model.section_comments.remove(&section);
        } else {
            model.section_comments.insert(section, comment.to_string());
        }
        self
    }

    /// Replace the comment emitted after the last section.
    pub fn set_trailing_comment(&self, comment: &str) -> &Self {
        self.write().trailing_comment = comment.to_string();
        self
    }

    /// Serialize the document and write it through `sink`.
    pub fn save_to(&self, sink: &dyn ByteSink, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_string();
        sink.write(path, &content)
            .map_err(|e| ConfigError::io(path, e))?;

        tracing::debug!(path = %path.display(), "Document saved");
        Ok(())
    }

    /// Serialize the document to `path`, replacing the file atomically.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.save_to(&FsSink, path)
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self::from_model(self.read().clone())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let model = self.read();
        f.debug_struct("Document")
            .field("sections", &model.sections)
            .field("section_comments", &model.section_comments)
            .field("trailing_comment", &model.trailing_comment)
            .field("included", &model.included)
            .finish()
    }
}
