//! Rendering of annotation values as display text.

use serde_json::{Map, Value};

/// Keys of Label Studio region values that hold the annotated labels.
const REGION_LABEL_KEYS: &[&str] = &["choices", "text"];

/// Renders an output value as a single line of text.
///
/// Strings pass through unchanged and lists are flattened and joined with
/// `,`. Label Studio region values (`{"choices": [...]}`, `{"text": [...]}`)
/// contribute their label entries. Anything else is rendered as compact JSON.
pub fn prettify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(prettify_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(map) => match region_labels(map) {
            Some(labels) => prettify_value(labels),
            None => value.to_string(),
        },
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

fn region_labels(map: &Map<String, Value>) -> Option<&Value> {
    REGION_LABEL_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|labels| labels.is_array()))
}
