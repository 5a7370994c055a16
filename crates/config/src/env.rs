//! Environment expression resolution.
//!
//! Responsibilities:
//! - Recognize `${NAME}` and `${NAME||fallback}` values, optionally wrapped
//!   in one layer of double quotes.
//! - Resolve them against the process environment at read time.
//!
//! Does NOT handle:
//! - Loading `.env` files. Hosts that want that populate the process
//!   environment first (the CLI does it through `dotenvy`).
//!
//! Invariants:
//! - Values that are not expressions pass through verbatim.
//! - An unset variable resolves to the empty string, or to the fallback
//!   literal when one is given. An empty variable also takes the fallback.
//! - Only the first `||` separates name and fallback.

use crate::constants::{ENV_EXPRESSION_END, ENV_EXPRESSION_START, ENV_FALLBACK_SEPARATOR, QUOTE};

/// Strip one leading and one trailing double quote, if present.
fn strip_quote_layer(value: &str) -> &str {
    let value = value.strip_prefix(QUOTE).unwrap_or(value);
    value.strip_suffix(QUOTE).unwrap_or(value)
}

/// Returns true if `value` is an environment expression.
pub fn is_env_expression(value: &str) -> bool {
    let value = strip_quote_layer(value);
    value.starts_with(ENV_EXPRESSION_START) && value.ends_with(ENV_EXPRESSION_END)
}

/// Read an environment variable, treating unset (or non-unicode) as empty.
fn env_var_or_empty(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    std::env::var(name).unwrap_or_default()
}

/// Resolve an environment expression into `(env_key, resolved_value)`.
///
/// Non-expressions return `("", value)` unchanged.
///
/// ```
/// use iniconf::resolve_env_expression;
///
/// let (key, value) = resolve_env_expression("${INICONF_DOC_UNSET||/etc/app}");
/// assert_eq!(key, "INICONF_DOC_UNSET");
/// assert_eq!(value, "/etc/app");
///
/// assert_eq!(resolve_env_expression("plain"), (String::new(), "plain".to_string()));
/// ```
pub fn resolve_env_expression(value: &str) -> (String, String) {
    if !is_env_expression(value) {
        return (String::new(), value.to_string());
    }

    let inner = strip_quote_layer(value);
    let inner = &inner[ENV_EXPRESSION_START.len()..inner.len() - ENV_EXPRESSION_END.len()];

    match inner.split_once(ENV_FALLBACK_SEPARATOR) {
        None => (inner.to_string(), env_var_or_empty(inner)),
        Some((name, fallback)) => {
            let resolved = env_var_or_empty(name);
            let resolved = if resolved.is_empty() {
                fallback.to_string()
            } else {
                resolved
            };
            (name.to_string(), resolved)
        }
    }
}

/// Resolve `value` if it is an expression, otherwise borrow it unchanged.
pub(crate) fn resolved_value(value: &str) -> std::borrow::Cow<'_, str> {
    if is_env_expression(value) {
        std::borrow::Cow::Owned(resolve_env_expression(value).1)
    } else {
        std::borrow::Cow::Borrowed(value)
    }
}
