//! Shared test utilities for the secsim workspace.
//!
//! Session reports carry wall-clock timestamps and the crate version, so
//! tests that compare JSON output run it through [`normalize_nondeterministic`]
//! first.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields of a session report.
///
/// `tool.version` is replaced only on the root object, and only when the root
/// looks like a report envelope (`schema`, `tool`, `decisions`). Timestamp keys
/// (`started_at`, `finished_at`, `timestamp`) are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("decisions");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at", "timestamp"] {
                if let Some(v) = map.get_mut(key)
                    && v.is_string()
                {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_envelope_and_nested_timestamps() {
        let input = json!({
            "schema": "secsim.session_report.v1",
            "tool": { "name": "secsim", "version": "0.1.0" },
            "started_at": "2024-05-01T09:30:00Z",
            "finished_at": "2024-05-01T09:30:07Z",
            "decisions": [],
            "events": [
                { "kind": "info", "message": "hello", "timestamp": "2024-05-01T09:30:00Z" }
            ],
            "traffic": [
                { "id": 1, "port": 80, "timestamp": "2024-05-01T09:30:00Z" }
            ]
        });

        let out = normalize_nondeterministic(input);

        assert_eq!(out["tool"]["version"], VERSION_PLACEHOLDER);
        assert_eq!(out["tool"]["name"], "secsim");
        assert_eq!(out["started_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(out["finished_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(out["events"][0]["timestamp"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(out["events"][0]["message"], "hello");
        assert_eq!(out["traffic"][0]["timestamp"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(out["traffic"][0]["port"], 80);
    }

    #[test]
    fn leaves_non_envelope_version_alone() {
        let input = json!({
            "tool": { "name": "secsim", "version": "0.1.0" }
        });
        let out = normalize_nondeterministic(input);
        assert_eq!(out["tool"]["version"], "0.1.0");
    }

    #[test]
    fn non_string_timestamp_is_untouched() {
        let input = json!({ "timestamp": 12 });
        let out = normalize_nondeterministic(input);
        assert_eq!(out["timestamp"], 12);
    }
}
