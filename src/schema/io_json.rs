//! JSON serialization for schemas.
//!
//! The JSON shape is the mapping produced by the labeling-config parser:
//!
//! ```json
//! {"label": {"type": "RectangleLabels", "to_name": ["img"],
//!            "inputs": [{"type": "Image", "value": "image"}]}}
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Schema;
use crate::error::LabelportError;

/// Reads a schema from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_schema_json(path: &Path) -> Result<Schema, LabelportError> {
    let file = File::open(path).map_err(LabelportError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelportError::SchemaJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a schema from a JSON string.
pub fn from_schema_json_str(json: &str) -> Result<Schema, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a schema from JSON bytes.
///
/// Useful for fuzzing and in-memory processing.
pub fn from_schema_json_slice(bytes: &[u8]) -> Result<Schema, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a schema to a pretty-printed JSON string.
pub fn to_schema_json_string(schema: &Schema) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::label_config::from_label_config_str;

    #[test]
    fn reads_label_studio_schema_dump() {
        let json = r#"{
            "label": {
                "type": "RectangleLabels",
                "to_name": ["img"],
                "inputs": [{"type": "Image", "value": "image", "valueList": null}],
                "labels": ["Cat"]
            },
            "ner": {
                "type": "Labels",
                "inputs": [{"type": "Text", "valueType": "url"}]
            }
        }"#;
        let schema = from_schema_json_str(json).expect("parse schema");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("label").unwrap().inputs[0].value.as_deref(), Some("image"));
        assert!(!schema.get("label").unwrap().inputs[0].value_list);
        assert_eq!(
            schema.get("ner").unwrap().inputs[0].value_type.as_deref(),
            Some("url")
        );
    }

    #[test]
    fn parsed_config_survives_json_dump() {
        let schema = from_label_config_str(
            r#"<View><Audio name="a" value="$audio"/><TextArea name="t" toName="a"/></View>"#,
        )
        .expect("parse config");

        let json = to_schema_json_string(&schema).expect("serialize");
        assert_eq!(from_schema_json_str(&json).expect("deserialize"), schema);
    }

    #[test]
    fn missing_type_is_rejected() {
        assert!(from_schema_json_str(r#"{"x": {"inputs": []}}"#).is_err());
    }
}
