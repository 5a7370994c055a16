//! Text rendering of a document.
//!
//! Output shape: `default` keys first, then every other section as
//! `\n[name]\n` (preceded by its comment), then the trailing comment. Each
//! entry is `key="value"` with its comment block on the lines before it.
//! Sections and keys come out in lexicographic order. Values are written raw,
//! so environment expressions survive a save.

use std::fmt::{self, Write};

use super::{Document, Entries, Model};
use crate::constants::DEFAULT_SECTION;

fn write_entries(out: &mut impl Write, entries: &Entries) -> fmt::Result {
    for entry in entries {
        if !entry.comment().is_empty() {
            write!(out, "\n{}\n", entry.comment())?;
        }
        writeln!(out, "{}=\"{}\"", entry.key(), entry.raw_value())?;
    }
    Ok(())
}

pub(crate) fn write_model(out: &mut impl Write, model: &Model) -> fmt::Result {
    if let Some(entries) = model.sections.get(DEFAULT_SECTION) {
        write_entries(out, entries)?;
    }

    for (name, entries) in &model.sections {
        if name == DEFAULT_SECTION {
            continue;
        }
        match model.section_comments.get(name).filter(|c| !c.is_empty()) {
            Some(comment) => write!(out, "\n{comment}\n[{name}]\n")?,
            None => write!(out, "\n[{name}]\n")?,
        }
        write_entries(out, entries)?;
    }

    out.write_str(&model.trailing_comment)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_model(f, &self.read())
    }
}
