//! Typed reads over a `Document`.
//!
//! Keys are bare (`port`, read from `default`) or compound (`web::port`).
//! Environment expressions are resolved before any conversion, so
//! `port = ${PORT||8080}` reads as an integer.
//!
//! The `get_*` family reports `KeyNotFound` / `Conversion`; the `default_*`
//! family never fails and returns the fallback instead.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{Document, Entries, Entry, KeyPath, section_name};
use crate::constants::LIST_SEPARATOR;
use crate::env::resolved_value;
use crate::error::ConfigError;
use crate::value::{FromConfigValue, split_list};

impl Document {
    /// Resolved value of `key`.
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        let path = KeyPath::parse(key);
        let model = self.read();
        model
            .lookup(&path)
            .map(|entry| resolved_value(entry.raw_value()).into_owned())
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Resolved value of `key` converted to `T`.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.lookup(key)?;
        T::from_config_value(&value).ok_or_else(|| ConfigError::Conversion {
            key: key.to_string(),
            value,
            target: T::TARGET,
        })
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.lookup(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i32, ConfigError> {
        self.get(key)
    }

    pub fn get_int64(&self, key: &str) -> Result<i64, ConfigError> {
        self.get(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.get(key)
    }

    /// Resolved value of `key` split on `separator`. An empty value yields an
    /// empty list.
    pub fn get_strings(&self, key: &str, separator: &str) -> Result<Vec<String>, ConfigError> {
        self.lookup(key).map(|value| split_list(&value, separator))
    }

    /// Resolved value of `key`, or `fallback` when it is absent or empty.
    pub fn default_string(&self, key: &str, fallback: &str) -> String {
        match self.lookup(key) {
            Ok(value) if !value.is_empty() => value,
            _ => fallback.to_string(),
        }
    }

    /// `;`-separated list value of `key`, or `fallback` when absent or empty.
    pub fn default_strings(&self, key: &str, fallback: Vec<String>) -> Vec<String> {
        match self.lookup(key) {
            Ok(value) if !value.is_empty() => split_list(&value, LIST_SEPARATOR),
            _ => fallback,
        }
    }

    pub fn default_int(&self, key: &str, fallback: i32) -> i32 {
        self.get(key).unwrap_or(fallback)
    }

    pub fn default_int64(&self, key: &str, fallback: i64) -> i64 {
        self.get(key).unwrap_or(fallback)
    }

    pub fn default_float(&self, key: &str, fallback: f64) -> f64 {
        self.get(key).unwrap_or(fallback)
    }

    pub fn default_bool(&self, key: &str, fallback: bool) -> bool {
        self.get(key).unwrap_or(fallback)
    }

    /// Copy of the stored entry addressed by `key`.
    pub fn get_entry(&self, key: &str) -> Option<Entry> {
        self.read().lookup(&KeyPath::parse(key)).cloned()
    }

    /// Raw (unresolved) values of a section.
    pub fn get_section(&self, section: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        let name = section_name(section);
        self.read()
            .sections
            .get(&name)
            .map(Entries::raw_values)
            .ok_or(ConfigError::SectionNotFound(name))
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.read().sections.contains_key(&section_name(section))
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.read().lookup(&KeyPath::parse(key)).is_some()
    }

    /// Section names in lexicographic order.
    pub fn section_names(&self) -> Vec<String> {
        self.read().sections.keys().cloned().collect()
    }

    pub fn section_comment(&self, section: &str) -> Option<String> {
        self.read()
            .section_comments
            .get(&section_name(section))
            .cloned()
    }

    pub fn trailing_comment(&self) -> String {
        self.read().trailing_comment.clone()
    }

    /// Files folded in through include directives, in path order. Saving
    /// writes their entries inline; the directives themselves are not kept.
    pub fn included_files(&self) -> Vec<PathBuf> {
        self.read().included.iter().cloned().collect()
    }

    /// True when the document has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.read().sections.is_empty()
    }

    /// Visit every section until `visitor` returns `false`.
    ///
    /// The shared lock is held for the whole walk, so the visitor must not
    /// mutate this document.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &Entries) -> bool,
    {
        let model = self.read();
        for (name, entries) in &model.sections {
            if !visitor(name, entries) {
                return;
            }
        }
    }

    /// Snapshot of every section with environment expressions resolved.
    pub fn to_resolved_map(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let model = self.read();
        model
            .sections
            .iter()
            .map(|(name, entries)| {
                let values = entries
                    .iter()
                    .map(|entry| (entry.key().to_string(), entry.value()))
                    .collect();
                (name.clone(), values)
            })
            .collect()
    }
}
