//! Expansion of Label Studio task exports into annotation records.
//!
//! A task looks like `{"id": 1, "data": {...}, "annotations": [{"result": [...]}]}`.
//! Every annotation becomes one record whose `output` groups result values
//! by `from_name`.

use serde_json::{Map, Value};

use super::AnnotationRecord;
use crate::schema::Schema;

/// Annotation-level fields carried into the record unchanged.
const ANNOTATION_FIELDS: &[&str] = &[
    "completed_by",
    "created_at",
    "updated_at",
    "lead_time",
    "history",
    "was_cancelled",
];

/// Result-level fields copied into each output value.
const RESULT_FIELDS: &[&str] = &[
    "original_width",
    "original_height",
    "image_rotation",
    "id",
    "to_name",
];

/// True if `item` looks like a task rather than a prepared record.
pub(super) fn is_task(item: &Map<String, Value>) -> bool {
    !item.contains_key("input") && item.contains_key("data")
}

/// Expands one task into records, one per annotation.
///
/// With a schema, only results whose `from_name` is an exported output tag
/// are kept, and each value is tagged with that output's type. A task with
/// no annotations yields one record with empty output.
pub(super) fn records_from_task(
    task: Map<String, Value>,
    schema: Option<&Schema>,
) -> Vec<AnnotationRecord> {
    let id = task.get("id").cloned();
    let input = match task.get("data") {
        Some(Value::Object(data)) => data.clone(),
        _ => Map::new(),
    };
    let agreement = task.get("agreement").cloned();

    let annotations: &[Value] = match task.get("annotations").or_else(|| task.get("completions")) {
        Some(Value::Array(annotations)) => annotations.as_slice(),
        _ => {
            log::warn!(
                "task {} has neither 'annotations' nor 'completions'",
                id.as_ref().map(Value::to_string).unwrap_or_default()
            );
            &[]
        }
    };

    if annotations.is_empty() {
        return vec![AnnotationRecord {
            id,
            input,
            ..Default::default()
        }];
    }

    annotations
        .iter()
        .filter_map(Value::as_object)
        .map(|annotation| {
            let mut extra = Map::new();
            if let Some(annotation_id) = annotation.get("id") {
                extra.insert("annotation_id".to_string(), annotation_id.clone());
            }
            for field in ANNOTATION_FIELDS {
                if let Some(value) = annotation.get(*field) {
                    extra.insert(field.to_string(), value.clone());
                }
            }
            if let Some(agreement) = &agreement {
                extra.insert("agreement".to_string(), agreement.clone());
            }

            AnnotationRecord {
                id: id.clone(),
                input: input.clone(),
                output: collect_outputs(annotation, schema),
                extra,
            }
        })
        .collect()
}

fn collect_outputs(annotation: &Map<String, Value>, schema: Option<&Schema>) -> Map<String, Value> {
    let mut outputs: Map<String, Value> = Map::new();

    let results = annotation
        .get("result")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for result in results.iter().filter_map(Value::as_object) {
        let Some(from_name) = result.get("from_name").and_then(Value::as_str) else {
            continue;
        };
        let tag_type = match schema {
            Some(schema) => match schema.get(from_name) {
                Some(output) => Value::String(output.tag_type.clone()),
                None => continue,
            },
            None => result.get("type").cloned().unwrap_or(Value::Null),
        };

        let mut value = match result.get("value") {
            Some(Value::Object(value)) => value.clone(),
            _ => Map::new(),
        };
        value.insert("type".to_string(), tag_type);
        for field in RESULT_FIELDS {
            if let Some(extra) = result.get(*field) {
                value.insert(field.to_string(), extra.clone());
            }
        }

        if let Value::Array(values) = outputs
            .entry(from_name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            values.push(Value::Object(value));
        }
    }

    outputs
}
