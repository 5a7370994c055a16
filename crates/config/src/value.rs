//! Scalar conversions applied to resolved string values.

/// Types a resolved value can be converted into by the typed accessors.
pub trait FromConfigValue: Sized {
    /// Type name reported in conversion errors.
    const TARGET: &'static str;

    fn from_config_value(value: &str) -> Option<Self>;
}

impl FromConfigValue for String {
    const TARGET: &'static str = "string";

    fn from_config_value(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl FromConfigValue for i32 {
    const TARGET: &'static str = "i32";

    fn from_config_value(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromConfigValue for i64 {
    const TARGET: &'static str = "i64";

    fn from_config_value(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromConfigValue for f64 {
    const TARGET: &'static str = "f64";

    fn from_config_value(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromConfigValue for bool {
    const TARGET: &'static str = "bool";

    fn from_config_value(value: &str) -> Option<Self> {
        parse_bool(value)
    }
}

/// Parse a boolean the way configuration files usually spell one.
///
/// Case-insensitive: `1, t, true, yes, y, on` are true and
/// `0, f, false, no, n, off` are false. Returns `None` for anything else.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Split a list value on `separator`. An empty value is an empty list;
/// empty items between separators are kept.
pub fn split_list(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(separator).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_true_like() {
        for value in ["1", "t", "T", "true", "TRUE", "True", "yes", "YES", "y", "Y", "on", "On"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
    }

    #[test]
    fn test_parse_bool_false_like() {
        for value in ["0", "f", "F", "false", "FALSE", "no", "No", "n", "N", "off", "OFF"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
    }

    #[test]
    fn test_parse_bool_rejects_other_values() {
        for value in ["", "2", "enabled", "yess", " true", "nope"] {
            assert_eq!(parse_bool(value), None, "{value}");
        }
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(i32::from_config_value("-42"), Some(-42));
        assert_eq!(i32::from_config_value("+7"), Some(7));
        assert_eq!(i32::from_config_value("3000000000"), None);
        assert_eq!(i64::from_config_value("3000000000"), Some(3_000_000_000));
        assert_eq!(f64::from_config_value("1.5e3"), Some(1500.0));
        assert_eq!(i32::from_config_value(""), None);
        assert_eq!(f64::from_config_value("abc"), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a;b;;c", ";"), vec!["a", "b", "", "c"]);
        assert_eq!(split_list("", ";"), Vec::<String>::new());
        assert_eq!(split_list("one", ","), vec!["one"]);
    }
}
