//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Declare the environment fallbacks for global flags.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not parse documents (see the `iniconf` crate).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iniconf")]
#[command(about = "Query and edit INI configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  iniconf -f app.ini get web::port --type int\n  iniconf -f app.ini get db::host --default localhost\n  iniconf -f app.ini set web::port 9090\n  iniconf -f app.ini dump --format json\n  iniconf -f base.ini merge local.ini --output merged.ini\n"
)]
pub struct Cli {
    /// Configuration file to load (defaults to the platform config directory).
    #[arg(short, long, global = true, env = "INICONF_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Section that keys before the first header belong to.
    #[arg(short, long, global = true, value_name = "NAME")]
    pub section: Option<String>,

    /// Log filter (e.g. `debug`, `iniconf=trace`). Overrides RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value of a key (`key` or `section::key`)
    Get {
        key: String,

        /// Value printed when the key is absent or does not convert
        #[arg(short, long, allow_hyphen_values = true)]
        default: Option<String>,

        /// Type the value must convert to
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,

        /// Separator for `--type list`
        #[arg(long, default_value = ";")]
        separator: String,
    },

    /// Print the raw `key = value` pairs of a section
    Section { name: String },

    /// List section names
    Sections,

    /// Set a key (`key` or `section::key`) and save the document
    ///
    /// The saved file holds the flattened document: entries from included
    /// files are written inline and `include` lines are not kept.
    Set {
        key: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Write the result here instead of back to the loaded file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete a key (`key` or `section::key`) and save the document
    ///
    /// The saved file holds the flattened document: entries from included
    /// files are written inline and `include` lines are not kept.
    Delete {
        key: String,

        /// Write the result here instead of back to the loaded file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the whole document
    Dump {
        #[arg(long, value_enum, default_value_t = DumpFormat::Ini)]
        format: DumpFormat,
    },

    /// Overlay another file on the loaded document (later file wins)
    Merge {
        other: PathBuf,

        /// Write the result here instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Int64,
    Float,
    Bool,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// INI text, values as stored
    Ini,
    /// JSON object of sections, environment expressions resolved
    Json,
}
