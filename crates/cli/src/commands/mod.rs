//! CLI command implementations.
//!
//! Handlers take a loaded `Document` and return the text to print, so the
//! dispatcher owns all stdout writes.

pub mod dump;
pub mod edit;
pub mod query;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use iniconf::{Document, FsSource, Parser};

/// The document a command operates on.
pub struct DocumentContext {
    pub path: PathBuf,
    pub section: String,
}

impl DocumentContext {
    pub fn new(path: PathBuf, section: Option<String>) -> Self {
        Self {
            path,
            section: section.unwrap_or_else(|| iniconf::DEFAULT_SECTION.to_string()),
        }
    }

    /// Parse the document, resolving includes on disk.
    pub fn load(&self) -> Result<Document> {
        load_document(&self.path, &self.section)
    }

    /// Save `doc` to `output`, or back to the loaded file.
    ///
    /// The flattened document is written, so entries pulled in by `include`
    /// lines land in the target and the directives are dropped.
    pub fn save(&self, doc: &Document, output: Option<&Path>) -> Result<PathBuf> {
        let target = output.unwrap_or(self.path.as_path());
        let included = doc.included_files();
        if !included.is_empty() {
            tracing::warn!(
                path = %target.display(),
                included = included.len(),
                "Included files are inlined into the saved document; include directives are not kept"
            );
        }
        doc.save_file(target)
            .with_context(|| format!("Failed to save {}", target.display()))?;
        tracing::info!(path = %target.display(), "Saved document");
        Ok(target.to_path_buf())
    }
}

pub fn load_document(path: &Path, section: &str) -> Result<Document> {
    Parser::new(&FsSource)
        .with_section(section)
        .parse_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}
