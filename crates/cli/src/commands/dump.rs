//! `dump`: render the whole document.

use anyhow::{Context, Result};
use iniconf::Document;

use crate::args::DumpFormat;

pub fn run(doc: &Document, format: DumpFormat) -> Result<String> {
    match format {
        DumpFormat::Ini => Ok(doc.to_string()),
        DumpFormat::Json => serde_json::to_string_pretty(&doc.to_resolved_map())
            .context("Failed to serialize document as JSON"),
    }
}
