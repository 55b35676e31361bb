// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value inspection helpers used for input validation.
//!
//! These operate on [`serde_json::Value`] so callers can validate loosely-typed
//! configuration and payloads with one vocabulary. All functions are pure.

use serde_json::Value;

/// Strings that stand in for "no value" and coerce to the empty string.
///
/// These are the renderings a page script produces when it stringifies a missing or
/// opaque value, so they never count as meaningful content.
pub const PLACEHOLDERS: [&str; 5] = [
    "undefined",
    "null",
    "[object]",
    "[object NodeList]",
    "[object HTMLBodyElement]",
];

/// Coerce a value to a string.
///
/// - `null` and the [`PLACEHOLDERS`] become `""`.
/// - Arrays join their items with `,` (nested `null` items render as `""`).
/// - Objects render as `[object Object]`.
pub fn string_value(value: &Value) -> String {
    match value {
        Value::String(s) if PLACEHOLDERS.contains(&s.as_str()) => String::new(),
        other => coerce(other),
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// True if the value carries nothing.
///
/// Empty: `null`, `false`, zero, strings that coerce to `""` (see [`string_value`]),
/// `[]` and `{}`. Anything populated is not empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => is_empty_str(s),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
    }
}

/// [`is_empty`] for a string without building a [`Value`].
pub fn is_empty_str(s: &str) -> bool {
    s.is_empty() || PLACEHOLDERS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values() {
        for v in [
            json!(null),
            json!(""),
            json!([]),
            json!({}),
            json!(false),
            json!(0),
            json!(0.0),
            json!("undefined"),
            json!("[object NodeList]"),
        ] {
            assert!(is_empty(&v), "{v} should be empty");
        }
    }

    #[test]
    fn populated_values() {
        for v in [
            json!("text"),
            json!([0]),
            json!({ "volume": 0.5 }),
            json!(true),
            json!(-1),
            json!(" "),
        ] {
            assert!(!is_empty(&v), "{v} should not be empty");
        }
    }

    #[test]
    fn string_coercion() {
        assert_eq!(string_value(&json!(null)), "");
        assert_eq!(string_value(&json!("null")), "");
        assert_eq!(string_value(&json!("player")), "player");
        assert_eq!(string_value(&json!(1.5)), "1.5");
        assert_eq!(string_value(&json!(true)), "true");
        assert_eq!(string_value(&json!([1, null, "a"])), "1,,a");
        assert_eq!(string_value(&json!([[1, 2], 3])), "1,2,3");
        assert_eq!(string_value(&json!({ "a": 1 })), "[object Object]");
    }

    #[test]
    fn placeholder_only_filtered_at_top_level() {
        assert_eq!(string_value(&json!(["null"])), "null");
    }

    #[test]
    fn str_shortcut_matches_value_form() {
        for s in ["", "null", "undefined", "[object]", "key", "0"] {
            assert_eq!(is_empty_str(s), is_empty(&json!(s)), "{s:?}");
        }
    }
}
