//! Line-oriented document parser.
//!
//! Responsibilities:
//! - Decode a byte buffer (optional UTF-8 BOM), walk it line by line and build
//!   a `Model` from comments, section headers, includes and assignments.
//! - Attach pending comment blocks to the next section or key, and keep
//!   whatever is left at the end as the trailing comment.
//!
//! Does NOT handle:
//! - Resolving include targets (see `include.rs`).
//! - Reading from disk directly; everything goes through a `ByteSource`.
//!
//! Invariants:
//! - A syntax error anywhere aborts the whole parse; no partial document.
//! - Blank lines never reset the pending comment block.
//! - Later assignments to the same section/key replace earlier ones.

mod include;
mod line;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_SECTION, UTF8_BOM};
use crate::document::{Document, Entry, Model, section_name};
use crate::error::ConfigError;
use crate::source::ByteSource;

use line::{Line, classify};

/// Files touched by one top-level parse.
#[derive(Debug, Default)]
pub(crate) struct IncludeTrail {
    /// Identities of the files whose parse is still in progress.
    active: Vec<PathBuf>,
    /// Identities of every file parsed so far, finished or not.
    seen: BTreeSet<PathBuf>,
}

impl IncludeTrail {
    pub(crate) fn has_seen(&self, identity: &Path) -> bool {
        self.seen.contains(identity)
    }
}

/// Parser configuration: where bytes come from, which section unheaded keys
/// land in, and which directory relative includes resolve against.
///
/// ```
/// use iniconf::{MemorySource, Parser};
///
/// let source = MemorySource::new()
///     .with_file("/etc/app/main.ini", "include extra.ini\nname = main\n")
///     .with_file("/etc/app/extra.ini", "[db]\nhost = localhost\n");
///
/// let doc = Parser::new(&source).parse_file("/etc/app/main.ini".as_ref()).unwrap();
/// assert_eq!(doc.get_string("db::host").unwrap(), "localhost");
/// ```
pub struct Parser<'a> {
    source: &'a dyn ByteSource,
    section: String,
    base_dir: PathBuf,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a dyn ByteSource) -> Self {
        Self {
            source,
            section: DEFAULT_SECTION.to_string(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Section that keys before the first header belong to.
    pub fn with_section(mut self, section: &str) -> Self {
        self.section = section_name(section);
        self
    }

    /// Directory relative includes resolve against when parsing bytes.
    /// `parse_file` always uses the file's own directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Parse an in-memory document.
    pub fn parse(&self, data: &[u8]) -> Result<Document, ConfigError> {
        let mut trail = IncludeTrail::default();
        self.parse_model(data, &self.section, &self.base_dir, &mut trail)
            .map(Document::from_model)
    }

    /// Read and parse `path`.
    pub fn parse_file(&self, path: &Path) -> Result<Document, ConfigError> {
        let mut trail = IncludeTrail::default();
        let model = self.parse_file_model(path, &self.section, &mut trail)?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(Document::from_model(model))
    }

    /// Read and parse one file. Re-entering a file that is still on the
    /// active part of `trail` is an `IncludeCycle`.
    pub(crate) fn parse_file_model(
        &self,
        path: &Path,
        section: &str,
        trail: &mut IncludeTrail,
    ) -> Result<Model, ConfigError> {
        let identity = self.source.identity(path);
        if trail.active.contains(&identity) {
            return Err(ConfigError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }

        let data = self
            .source
            .read(path)
            .map_err(|e| ConfigError::io(path, e))?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        trail.seen.insert(identity.clone());
        trail.active.push(identity);
        let result = self.parse_model(&data, section, &base_dir, trail);
        trail.active.pop();
        result
    }

    pub(crate) fn parse_model(
        &self,
        data: &[u8],
        section: &str,
        base_dir: &Path,
        trail: &mut IncludeTrail,
    ) -> Result<Model, ConfigError> {
        let data = data.strip_prefix(&UTF8_BOM[..]).unwrap_or(data);
        if data.is_empty() {
            return Err(ConfigError::EmptyInput);
        }
        let text = String::from_utf8_lossy(data);

        let mut model = Model::default();
        let mut section = section_name(section);
        let mut comment = String::new();

        for (index, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();
            match classify(line) {
                Line::Blank => {}
                Line::Comment(comment_line) => {
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(comment_line);
                }
                Line::Section(name) => {
                    section = name;
                    model.section_mut(&section);
                    if !comment.is_empty() {
                        model
                            .section_comments
                            .insert(section.clone(), std::mem::take(&mut comment));
                    }
                }
                Line::Include(target) => {
                    self.include(target, &section, base_dir, trail, &mut model);
                }
                Line::KeyValue { key, value } => {
                    let entry = Entry::new(section.clone(), key, value, std::mem::take(&mut comment));
                    model.insert(entry);
                }
                Line::Invalid => {
                    return Err(ConfigError::Syntax {
                        line_number: index + 1,
                        line: line.to_string(),
                    });
                }
            }
        }

        if !comment.is_empty() {
            model.trailing_comment = comment;
        }
        Ok(model)
    }
}
