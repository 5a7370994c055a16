//! `include` directive resolution.
//!
//! Responsibilities:
//! - Resolve an include target against the including file's directory.
//! - Parse a target file, or every `.ini` / `.conf` file of a directory
//!   include, and fold the result into the including document.
//!
//! Does NOT handle:
//! - Failing the including parse. Every include problem (missing target,
//!   unreadable or malformed file, cycle) is logged and skipped.
//!
//! Invariants / Assumptions:
//! - A directory include lists the *including file's* directory, not the
//!   include target. Sub-directories are not descended into and files are
//!   visited in path order.
//! - Included files start in the section that was current at the directive.
//! - A file that is already being parsed further up the include chain is
//!   never re-entered.
//! - A directory include skips files already parsed anywhere in the current
//!   top-level parse, so sibling files that each include their directory are
//!   parsed once apiece.

use std::path::Path;

use super::{IncludeTrail, Parser};
use crate::constants::INCLUDE_EXTENSIONS;
use crate::document::Model;
use crate::source::PathKind;

fn has_include_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| INCLUDE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

impl Parser<'_> {
    pub(super) fn include(
        &self,
        target: &str,
        section: &str,
        base_dir: &Path,
        trail: &mut IncludeTrail,
        model: &mut Model,
    ) {
        let target = Path::new(target);
        let path = if target.is_absolute() {
            target.to_path_buf()
        } else {
            base_dir.join(target)
        };

        match self.source.kind(&path) {
            Ok(PathKind::Directory) => self.include_directory(base_dir, section, trail, model),
            Ok(_) => self.include_file(&path, section, trail, model),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Include target is not accessible, skipping"
                );
            }
        }
    }

    fn include_directory(
        &self,
        dir: &Path,
        section: &str,
        trail: &mut IncludeTrail,
        model: &mut Model,
    ) {
        let mut candidates = match self.source.list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %dir.display(),
                    error = %e,
                    "Failed to list include directory, skipping"
                );
                return;
            }
        };
        candidates.sort();

        for candidate in candidates {
            if !has_include_extension(&candidate) {
                continue;
            }
            if !matches!(self.source.kind(&candidate), Ok(PathKind::File)) {
                continue;
            }
            if trail.has_seen(&self.source.identity(&candidate)) {
                tracing::debug!(
                    path = %candidate.display(),
                    "Directory include candidate already parsed, skipping"
                );
                continue;
            }
            self.include_file(&candidate, section, trail, model);
        }
    }

    fn include_file(
        &self,
        path: &Path,
        section: &str,
        trail: &mut IncludeTrail,
        model: &mut Model,
    ) {
        match self.parse_file_model(path, section, trail) {
            Ok(included) => {
                tracing::debug!(path = %path.display(), "Included configuration file");
                model.included.insert(path.to_path_buf());
                model.absorb(included);
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to include configuration file, skipping"
                );
            }
        }
    }
}
