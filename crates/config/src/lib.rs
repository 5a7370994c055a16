//! INI-style configuration store.
//!
//! This crate parses INI documents into a thread-safe, queryable model with
//! nested file inclusion, `${NAME||fallback}` environment interpolation and
//! comment preservation, and serializes the model back to text.
//!
//! ```
//! use iniconf::Document;
//!
//! let doc = Document::parse(b"[web]\nport = 8080\ndebug = on\n").unwrap();
//! assert_eq!(doc.get_int("web::port").unwrap(), 8080);
//! assert!(doc.default_bool("web::debug", false));
//! assert!(doc.default_bool("web::missing", true));
//! ```

pub mod constants;
mod document;
mod env;
mod error;
mod parser;
mod source;
mod value;

pub use constants::DEFAULT_SECTION;
pub use document::{Document, Entries, Entry, merge_optional};
pub use env::{is_env_expression, resolve_env_expression};
pub use error::ConfigError;
pub use parser::Parser;
pub use source::{ByteSink, ByteSource, FsSink, FsSource, MemorySource, PathKind};
pub use value::{FromConfigValue, parse_bool, split_list};

/// Build a fresh document from `first` overlaid with `second`.
pub fn merge(first: &Document, second: &Document) -> Document {
    first.merge(second)
}
