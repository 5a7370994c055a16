//! Entries and per-section entry sets.
//!
//! Responsibilities:
//! - Hold one key/value pair with its section, comment and environment key.
//! - Provide bare-key accessors over a single section (`Entries`), the view
//!   handed to `Document::for_each` visitors.
//!
//! Invariants:
//! - `Entry::env_key` is non-empty iff the raw value is an environment
//!   expression.
//! - Entries are replaced wholesale; nothing mutates an entry in place.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::key_name;
use crate::env::{resolve_env_expression, resolved_value};
use crate::value::{FromConfigValue, split_list};

/// A single key/value pair plus its attached comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    section: String,
    key: String,
    value: String,
    env_key: String,
    comment: String,
}

impl Entry {
    /// Build an entry, classifying `value` as an environment expression.
    ///
    /// Callers pass already-normalized section and key names.
    pub(crate) fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        let value = value.into();
        let (env_key, _) = resolve_env_expression(&value);
        Self {
            section: section.into(),
            key: key.into(),
            value,
            env_key,
            comment: comment.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value exactly as stored (an unresolved expression stays as is).
    pub fn raw_value(&self) -> &str {
        &self.value
    }

    /// The value with any environment expression resolved.
    pub fn value(&self) -> String {
        resolved_value(&self.value).into_owned()
    }

    /// Name of the referenced environment variable, empty for plain values.
    pub fn env_key(&self) -> &str {
        &self.env_key
    }

    pub fn is_env_expression(&self) -> bool {
        !self.env_key.is_empty()
    }

    /// Leading comment block, lines joined with `\n`. Empty when absent.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// The entries of one section, keyed by lower-cased key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    entries: BTreeMap<String, Entry>,
}

impl Entries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `key`, matched case-insensitively like `Document` lookups.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(&key_name(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key_name(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Entry> {
        self.entries.values()
    }

    /// Resolved value of `key`, or `None` when the key is absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(Entry::value)
    }

    /// Resolved value of `key`; `fallback` when absent or empty.
    pub fn default_string(&self, key: &str, fallback: &str) -> String {
        match self.get_string(key) {
            Some(value) if !value.is_empty() => value,
            _ => fallback.to_string(),
        }
    }

    /// Resolved value of `key` split on `separator`; `fallback` when absent or empty.
    pub fn default_strings(&self, key: &str, separator: &str, fallback: Vec<String>) -> Vec<String> {
        match self.get_string(key) {
            Some(value) if !value.is_empty() => split_list(&value, separator),
            _ => fallback,
        }
    }

    pub fn default_int(&self, key: &str, fallback: i32) -> i32 {
        self.default_parsed(key, fallback)
    }

    pub fn default_int64(&self, key: &str, fallback: i64) -> i64 {
        self.default_parsed(key, fallback)
    }

    pub fn default_float(&self, key: &str, fallback: f64) -> f64 {
        self.default_parsed(key, fallback)
    }

    pub fn default_bool(&self, key: &str, fallback: bool) -> bool {
        self.default_parsed(key, fallback)
    }

    fn default_parsed<T: FromConfigValue>(&self, key: &str, fallback: T) -> T {
        self.get_string(key)
            .and_then(|value| T::from_config_value(&value))
            .unwrap_or(fallback)
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.remove(key)
    }

    /// Insert every entry of `other`, replacing entries with the same key.
    pub(crate) fn extend(&mut self, other: Entries) {
        self.entries.extend(other.entries);
    }

    pub(crate) fn raw_values(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = btree_map::Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_entries_keys_match_case_insensitively() {
        let entries = sample();
        assert_eq!(entries.default_int("Port", 0), 8080);
        assert_eq!(entries.get_string(" PORT ").as_deref(), Some("8080"));
        assert!(entries.contains_key("Debug"));
        assert!(entries.default_bool("DEBUG", false));
        assert_eq!(entries.get("Hosts").map(Entry::raw_value), Some("a;b;c"));
    }

    fn sample() -> Entries {
        let mut entries = Entries::default();
        entries.insert(Entry::new("web", "port", "8080", ""));
        entries.insert(Entry::new("web", "debug", "on", "# toggles debug"));
        entries.insert(Entry::new("web", "hosts", "a;b;c", ""));
        entries.insert(Entry::new("web", "empty", "", ""));
        entries.insert(Entry::new("web", "ratio", "0.75", ""));
        entries
    }

    #[test]
    fn test_entry_classifies_env_expression() {
        let plain = Entry::new("default", "a", "value", "");
        assert_eq!(plain.env_key(), "");
        assert!(!plain.is_env_expression());

        let expr = Entry::new("default", "a", "${INICONF_ENTRY_TEST||x}", "");
        assert_eq!(expr.env_key(), "INICONF_ENTRY_TEST");
        assert!(expr.is_env_expression());
        assert_eq!(expr.raw_value(), "${INICONF_ENTRY_TEST||x}");
    }

    #[test]
    #[serial]
    fn test_entry_value_resolves_at_read_time() {
        let entry = Entry::new("default", "home", "${INICONF_ENTRY_HOME||/fallback}", "");
        temp_env::with_var("INICONF_ENTRY_HOME", Some("/home/me"), || {
            assert_eq!(entry.value(), "/home/me");
        });
        temp_env::with_var_unset("INICONF_ENTRY_HOME", || {
            assert_eq!(entry.value(), "/fallback");
        });
    }

    #[test]
    fn test_entries_typed_defaults() {
        let entries = sample();
        assert_eq!(entries.default_int("port", 0), 8080);
        assert_eq!(entries.default_int64("port", 0), 8080);
        assert!(entries.default_bool("debug", false));
        assert_eq!(entries.default_float("ratio", 0.0), 0.75);
        assert_eq!(entries.default_int("debug", 7), 7);
        assert_eq!(entries.default_int("missing", 7), 7);
    }

    #[test]
    fn test_entries_string_defaults() {
        let entries = sample();
        assert_eq!(entries.get_string("port").as_deref(), Some("8080"));
        assert_eq!(entries.get_string("missing"), None);
        assert_eq!(entries.default_string("empty", "fb"), "fb");
        assert_eq!(entries.default_string("port", "fb"), "8080");
        assert_eq!(
            entries.default_strings("hosts", ";", vec![]),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            entries.default_strings("missing", ";", vec!["x".to_string()]),
            vec!["x"]
        );
    }

    #[test]
    fn test_entries_iterate_in_key_order() {
        let entries = sample();
        let keys: Vec<&str> = entries.keys().collect();
        assert_eq!(keys, vec!["debug", "empty", "hosts", "port", "ratio"]);
        assert_eq!(entries.iter().count(), 5);
        assert_eq!(entries.get("debug").unwrap().comment(), "# toggles debug");
    }
}
