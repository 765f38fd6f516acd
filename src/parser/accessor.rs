// src/parser/accessor.rs
//! The single primitive used to walk a response document.

use crate::model::Cell;
use serde_json::Value;

/// Follows a JSON pointer, treating an explicit `null` like a missing key.
pub fn lookup<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

/// [`lookup`] narrowed to a leaf cell; containers and gaps become `Null`.
pub fn cell_at(value: &Value, pointer: &str) -> Cell {
    lookup(value, pointer).map(Cell::from_json).unwrap_or_default()
}

/// String members of the array at `pointer`; anything else is skipped.
pub fn strings_at<'a>(value: &'a Value, pointer: &str) -> impl Iterator<Item = &'a str> {
    lookup(value, pointer)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_through_objects_and_arrays() {
        let doc = json!({ "a": { "b": [ { "name": "x" } ], "gone": null } });
        assert_eq!(lookup(&doc, "/a/b/0/name"), Some(&json!("x")));
        assert_eq!(lookup(&doc, "/a/b/1/name"), None);
        assert_eq!(lookup(&doc, "/a/gone"), None);
        assert_eq!(cell_at(&doc, "/a/b/0/name"), Cell::text("x"));
        assert_eq!(cell_at(&doc, "/a/b"), Cell::Null);
    }

    #[test]
    fn test_strings_at_skips_non_strings() {
        let doc = json!({ "list": ["Pool", 3, null, "Gym"] });
        assert_eq!(strings_at(&doc, "/list").collect::<Vec<_>>(), vec!["Pool", "Gym"]);
        assert_eq!(strings_at(&doc, "/missing").count(), 0);
    }
}
