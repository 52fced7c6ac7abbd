//! Field-level diffs of item snapshots
//!
//! An update entry records which fields of the item changed. Snapshots are
//! the item serialized to a JSON object; fields are compared by name in
//! alphabetical order so summaries are stable across runs.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

const MAX_SHOWN_CHARS: usize = 40;

/// One field whose value differs between two snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    /// `None` when the field was absent before
    pub before: Option<Value>,
    /// `None` when the field is absent after
    pub after: Option<Value>,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<Value>, missing: &str| match value {
            Some(value) => short_value(value),
            None => missing.to_string(),
        };
        write!(
            f,
            "{}: {} -> {}",
            self.field,
            show(&self.before, "(added)"),
            show(&self.after, "(removed)")
        )
    }
}

/// Changed fields between two object snapshots
///
/// Non-object snapshots compare as a single unnamed field.
pub fn field_changes(before: &Value, after: &Value) -> Vec<FieldChange> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        if before == after {
            return Vec::new();
        }
        return vec![FieldChange {
            field: "value".to_string(),
            before: Some(before.clone()),
            after: Some(after.clone()),
        }];
    };

    let fields: BTreeSet<&String> = before_obj.keys().chain(after_obj.keys()).collect();

    fields
        .into_iter()
        .filter_map(|field| {
            let old = before_obj.get(field);
            let new = after_obj.get(field);
            (old != new).then(|| FieldChange {
                field: field.clone(),
                before: old.cloned(),
                after: new.cloned(),
            })
        })
        .collect()
}

/// Summary line such as `amount: 2000 -> 2100, name: "a" -> "b"`
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = field_changes(before, after);
    if changes.is_empty() {
        return None;
    }

    Some(
        changes
            .iter()
            .map(FieldChange::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn short_value(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= MAX_SHOWN_CHARS {
        return text;
    }

    let head: String = text.chars().take(MAX_SHOWN_CHARS - 3).collect();
    match value {
        Value::String(_) => format!("{}...\"", head),
        _ => format!("{}...", head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"name": "rent", "amount": 2000});
        let after = json!({"name": "rent", "amount": 2100});

        assert_eq!(generate_diff(&before, &after).unwrap(), "amount: 2000 -> 2100");
    }

    #[test]
    fn test_changes_are_sorted_by_field() {
        let before = json!({"scope": "2025-08", "name": "trip", "amount": 1});
        let after = json!({"scope": "2025-12", "name": "holiday", "amount": 1});

        let changes = field_changes(&before, &after);
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "scope"]);
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "name: \"trip\" -> \"holiday\", scope: \"2025-08\" -> \"2025-12\""
        );
    }

    #[test]
    fn test_field_added_and_removed() {
        let before = json!({"name": "x", "old": 1});
        let after = json!({"name": "x", "updated_at": "2025-01-01T00:00:00Z"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("old: 1 -> (removed)"));
        assert!(diff.contains("updated_at: (added) -> \"2025-01-01T00:00:00Z\""));
    }

    #[test]
    fn test_identical_snapshots() {
        let value = json!({"name": "x", "amount": 1});
        assert!(field_changes(&value, &value).is_empty());
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_names_are_shortened() {
        let before = json!({"name": "名".repeat(60)});
        let after = json!({"name": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.starts_with("name: \"名"));
        assert!(diff.contains("...\" -> \"short\""));
    }

    #[test]
    fn test_non_object_snapshots() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)).unwrap(),
            "value: 1 -> 2"
        );
        assert!(generate_diff(&json!("a"), &json!("a")).is_none());
    }
}
