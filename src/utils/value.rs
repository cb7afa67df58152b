//! Helpers for reading loosely shaped JSON settings.
//!
//! Settings come from user-edited files, so every accessor degrades to
//! `None` or a default instead of failing on an unexpected shape.

use serde_json::Value;

/// Truthiness of a settings value.
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy; everything
/// else, including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `value[key]` as an owned string when it is present and a string.
#[must_use]
pub fn get_string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Looks up a dotted path such as `arguments.build` in nested objects.
///
/// An empty path returns the root.
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, part| current.as_object()?.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_get_string_ignores_non_strings() {
        let value = json!({ "label": "Build", "count": 3 });
        assert_eq!(get_string(&value, "label"), Some("Build".to_string()));
        assert_eq!(get_string(&value, "count"), None);
        assert_eq!(get_string(&value, "missing"), None);
        assert_eq!(get_string(&json!("scalar"), "label"), None);
    }

    #[test]
    fn test_get_path() {
        let value = json!({ "arguments": { "build": { "command": "cargo" } } });
        assert_eq!(get_path(&value, "arguments.build.command"), Some(&json!("cargo")));
        assert_eq!(get_path(&value, ""), Some(&value));
        assert!(get_path(&value, "arguments.test").is_none());
        assert!(get_path(&value, "arguments.build.command.deeper").is_none());
    }
}
