//! Command dispatch logic.
//!
//! Responsibilities:
//! - Resolve the document path and load the document.
//! - Route parsed CLI arguments to the matching command handler.
//! - Print handler output to stdout.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Logging and `.env` setup (see `main()`).

use anyhow::{Result, anyhow};

use crate::args::{Cli, Commands};
use crate::commands::{self, DocumentContext};
use crate::environment::default_document_path;

/// Run the parsed command against its document.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let path = cli
        .file
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(default_document_path)
        .ok_or_else(|| anyhow!("No configuration file given; pass --file or set INICONF_FILE"))?;
    let ctx = DocumentContext::new(path, cli.section);
    let doc = ctx.load()?;

    let output = match cli.command {
        Commands::Get {
            key,
            default,
            value_type,
            separator,
        } => commands::query::run_get(&doc, &key, default.as_deref(), value_type, &separator)?,
        Commands::Section { name } => commands::query::run_section(&doc, &name)?,
        Commands::Sections => commands::query::run_sections(&doc),
        Commands::Set { key, value, output } => {
            commands::edit::run_set(&ctx, &doc, &key, &value, output.as_deref())?
        }
        Commands::Delete { key, output } => {
            commands::edit::run_delete(&ctx, &doc, &key, output.as_deref())?
        }
        Commands::Dump { format } => commands::dump::run(&doc, format)?,
        Commands::Merge { other, output } => {
            commands::edit::run_merge(&ctx, &doc, &other, output.as_deref())?
        }
    };

    emit(&output);
    Ok(())
}

/// Print handler output; rendered documents already end with a newline.
fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
