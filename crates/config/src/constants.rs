//! Centralized constants for the iniconf grammar and model.
//!
//! Parser, accessors and serializer share these so the grammar is spelled
//! out in exactly one place.

// =============================================================================
// Model
// =============================================================================

/// Section that holds keys not under any explicit `[section]` header.
pub const DEFAULT_SECTION: &str = "default";

/// Separator between section and key in compound keys (`section::key`).
pub const COMPOUND_KEY_SEPARATOR: &str = "::";

/// Separator used by `default_strings` when splitting a list value.
pub const LIST_SEPARATOR: &str = ";";

// =============================================================================
// Line grammar
// =============================================================================

/// Prefixes that mark a whole line as a comment.
pub const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

pub const SECTION_START: char = '[';
pub const SECTION_END: char = ']';
pub const ASSIGNMENT: char = '=';
pub const QUOTE: char = '"';

/// Literal prefix that turns a line without `=` into an include directive.
pub const INCLUDE_PREFIX: &str = "include ";

/// Directive keyword (first token of an include line).
pub const INCLUDE_KEYWORD: &str = "include";

/// File name suffixes picked up by a directory include.
pub const INCLUDE_EXTENSIONS: [&str; 2] = [".ini", ".conf"];

/// UTF-8 byte-order mark stripped from the start of a document.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

// =============================================================================
// Environment expressions
// =============================================================================

pub const ENV_EXPRESSION_START: &str = "${";
pub const ENV_EXPRESSION_END: &str = "}";

/// Separates the variable name from its fallback literal in `${NAME||fallback}`.
pub const ENV_FALLBACK_SEPARATOR: &str = "||";

// =============================================================================
// Persistence
// =============================================================================

/// Extension of the sibling file written before the atomic rename on save.
pub const TEMP_FILE_EXTENSION: &str = "tmp";
