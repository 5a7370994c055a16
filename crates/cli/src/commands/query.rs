//! Read-only commands: `get`, `section`, `sections`.

use anyhow::{Context, Result};
use iniconf::{ConfigError, Document, FromConfigValue, split_list};

use crate::args::ValueType;

/// Convert a `--default` argument the same way a stored value would be.
fn parse_default<T: FromConfigValue>(key: &str, value: &str) -> Result<T, ConfigError> {
    T::from_config_value(value).ok_or_else(|| ConfigError::Conversion {
        key: key.to_string(),
        value: value.to_string(),
        target: T::TARGET,
    })
}

fn typed_default(
    doc: &Document,
    key: &str,
    default: &str,
    value_type: ValueType,
    separator: &str,
) -> Result<String, ConfigError> {
    Ok(match value_type {
        ValueType::String => doc.default_string(key, default),
        ValueType::Int => doc.default_int(key, parse_default(key, default)?).to_string(),
        ValueType::Int64 => doc
            .default_int64(key, parse_default(key, default)?)
            .to_string(),
        ValueType::Float => doc
            .default_float(key, parse_default(key, default)?)
            .to_string(),
        ValueType::Bool => doc
            .default_bool(key, parse_default(key, default)?)
            .to_string(),
        ValueType::List => {
            let fallback = split_list(default, separator);
            match doc.get_strings(key, separator) {
                Ok(items) if !items.is_empty() => items.join("\n"),
                _ => fallback.join("\n"),
            }
        }
    })
}

fn typed_value(
    doc: &Document,
    key: &str,
    value_type: ValueType,
    separator: &str,
) -> Result<String, ConfigError> {
    Ok(match value_type {
        ValueType::String => doc.get_string(key)?,
        ValueType::Int => doc.get_int(key)?.to_string(),
        ValueType::Int64 => doc.get_int64(key)?.to_string(),
        ValueType::Float => doc.get_float(key)?.to_string(),
        ValueType::Bool => doc.get_bool(key)?.to_string(),
        ValueType::List => doc.get_strings(key, separator)?.join("\n"),
    })
}

/// Resolved value of `key` as text, one list item per line.
pub fn run_get(
    doc: &Document,
    key: &str,
    default: Option<&str>,
    value_type: ValueType,
    separator: &str,
) -> Result<String> {
    match default {
        Some(default) => typed_default(doc, key, default, value_type, separator)
            .with_context(|| format!("Invalid default for key '{key}'")),
        None => typed_value(doc, key, value_type, separator)
            .with_context(|| format!("Failed to read key '{key}'")),
    }
}

/// Raw `key = value` lines of one section.
pub fn run_section(doc: &Document, name: &str) -> Result<String> {
    let entries = doc
        .get_section(name)
        .with_context(|| format!("Failed to read section '{name}'"))?;
    Ok(entries
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn run_sections(doc: &Document) -> String {
    doc.section_names().join("\n")
}
