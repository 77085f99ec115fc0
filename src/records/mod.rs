//! Annotation record sources.
//!
//! Records are read from JSON, either from every `*.json` file directly
//! inside a directory or from a single aggregate file. A file holds one
//! item or an array of items, and each item is either a prepared record
//! (`{"input": {...}, "output": {...}}`) or a Label Studio task, which is
//! expanded into one record per annotation.
//!
//! Iteration is lazy at file granularity: a file is parsed only when the
//! records before it have been consumed. Every call to [`iter_from_dir`] or
//! [`iter_from_json_file`] starts a fresh pass over the source.

mod prettify;
mod task;

pub use prettify::prettify_value;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::vec;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::LabelportError;
use crate::schema::Schema;

const JSON_EXTENSION: &str = "json";

/// One labeled example.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Task data, keyed by data key.
    #[serde(default)]
    pub input: Map<String, Value>,
    /// Annotation results, keyed by output tag name.
    #[serde(default)]
    pub output: Map<String, Value>,
    /// Any other annotation metadata (`annotation_id`, `completed_by`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lazy iterator over the records of one or more JSON files.
#[derive(Debug)]
pub struct RecordIter<'a> {
    files: vec::IntoIter<PathBuf>,
    pending: vec::IntoIter<AnnotationRecord>,
    schema: Option<&'a Schema>,
}

impl<'a> RecordIter<'a> {
    fn new(files: Vec<PathBuf>, schema: Option<&'a Schema>) -> Self {
        Self {
            files: files.into_iter(),
            pending: Vec::new().into_iter(),
            schema,
        }
    }
}

impl Iterator for RecordIter<'_> {
    type Item = Result<AnnotationRecord, LabelportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(Ok(record));
            }
            let path = self.files.next()?;
            match read_records_file(&path, self.schema) {
                Ok(records) => self.pending = records.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Iterates records from every `*.json` file directly inside `dir`.
///
/// Files are visited in file-name order. `schema`, when given, restricts
/// task expansion to its output tags.
///
/// # Errors
/// Fails if `dir` does not exist. A directory without JSON files yields no
/// records. Parse errors are reported by the iterator when the offending
/// file is reached.
pub fn iter_from_dir<'a>(
    dir: &Path,
    schema: Option<&'a Schema>,
) -> Result<RecordIter<'a>, LabelportError> {
    if !dir.is_dir() {
        return Err(LabelportError::RecordSource {
            path: dir.to_path_buf(),
            message: "directory not found".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LabelportError::RecordSource {
            path: dir.to_path_buf(),
            message: format!("failed while listing directory: {source}"),
        })?;
        if entry.file_type().is_file() && has_json_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();

    log::debug!("reading records from {} file(s) in {}", files.len(), dir.display());
    Ok(RecordIter::new(files, schema))
}

/// Iterates records from a single JSON file.
///
/// # Errors
/// Fails if `path` is not a file.
pub fn iter_from_json_file<'a>(
    path: &Path,
    schema: Option<&'a Schema>,
) -> Result<RecordIter<'a>, LabelportError> {
    if !path.is_file() {
        return Err(LabelportError::RecordSource {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }
    Ok(RecordIter::new(vec![path.to_path_buf()], schema))
}

/// Picks the directory or single-file strategy.
pub fn iter_records<'a>(
    path: &Path,
    is_dir: bool,
    schema: Option<&'a Schema>,
) -> Result<RecordIter<'a>, LabelportError> {
    if is_dir {
        iter_from_dir(path, schema)
    } else {
        iter_from_json_file(path, schema)
    }
}

/// Parses records from JSON bytes.
///
/// Useful for fuzzing and in-memory processing.
pub fn from_records_slice(
    bytes: &[u8],
    schema: Option<&Schema>,
) -> Result<Vec<AnnotationRecord>, LabelportError> {
    let path = Path::new("<bytes>");
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| LabelportError::RecordJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    records_from_value(value, path, schema)
}

/// Fuzz-only entrypoint: parses records and prettifies every output value.
#[cfg(feature = "fuzzing")]
pub fn fuzz_prettify_records(bytes: &[u8]) -> Result<(), LabelportError> {
    for record in from_records_slice(bytes, None)? {
        for value in record.output.values() {
            let _ = prettify_value(value);
        }
    }
    Ok(())
}

fn read_records_file(
    path: &Path,
    schema: Option<&Schema>,
) -> Result<Vec<AnnotationRecord>, LabelportError> {
    let file = File::open(path).map_err(LabelportError::Io)?;
    let reader = BufReader::new(file);

    let value: Value =
        serde_json::from_reader(reader).map_err(|source| LabelportError::RecordJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    records_from_value(value, path, schema)
}

fn records_from_value(
    value: Value,
    path: &Path,
    schema: Option<&Schema>,
) -> Result<Vec<AnnotationRecord>, LabelportError> {
    let items = match value {
        Value::Object(item) => vec![item],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(item) => Ok(item),
                other => Err(LabelportError::RecordSource {
                    path: path.to_path_buf(),
                    message: format!("expected an object per item, found {other}"),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(LabelportError::RecordSource {
                path: path.to_path_buf(),
                message: format!("expected an object or an array of objects, found {other}"),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        if task::is_task(&item) {
            records.extend(task::records_from_task(item, schema));
        } else {
            let record = serde_json::from_value(Value::Object(item)).map_err(|source| {
                LabelportError::RecordJsonParse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            records.push(record);
        }
    }
    Ok(records)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_is_one_record() {
        let records =
            from_records_slice(br#"{"input": {"image": "a.jpg"}, "output": {"choice": "cat"}}"#, None)
                .expect("parse records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].input["image"], json!("a.jpg"));
        assert_eq!(records[0].output["choice"], json!("cat"));
    }

    #[test]
    fn extra_fields_are_preserved() {
        let records = from_records_slice(
            br#"[{"id": 4, "input": {}, "output": {}, "annotation_id": 9}]"#,
            None,
        )
        .expect("parse records");
        assert_eq!(records[0].id, Some(json!(4)));
        assert_eq!(records[0].extra["annotation_id"], json!(9));
    }

    #[test]
    fn tasks_are_expanded() {
        let records = from_records_slice(
            br#"[{"id": 1, "data": {"image": "a.jpg"}, "annotations": []}]"#,
            None,
        )
        .expect("parse records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].input["image"], json!("a.jpg"));
    }

    #[test]
    fn scalars_are_rejected() {
        let err = from_records_slice(b"42", None).unwrap_err();
        assert!(matches!(err, LabelportError::RecordSource { .. }));
        let err = from_records_slice(b"[1]", None).unwrap_err();
        assert!(matches!(err, LabelportError::RecordSource { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = from_records_slice(b"{not json", None).unwrap_err();
        assert!(matches!(err, LabelportError::RecordJsonParse { .. }));
    }

    #[test]
    fn directory_without_json_files_is_empty() {
        let temp = tempfile::tempdir().expect("create temp dir");
        std::fs::write(temp.path().join("notes.txt"), "not a record").unwrap();

        let records: Vec<_> = iter_from_dir(temp.path(), None)
            .expect("empty directory is a valid source")
            .collect();
        assert!(records.is_empty());

        let err = iter_from_dir(&temp.path().join("missing"), None).unwrap_err();
        assert!(matches!(err, LabelportError::RecordSource { .. }));
    }

    #[test]
    fn json_extension_is_case_insensitive() {
        assert!(has_json_extension(Path::new("a.json")));
        assert!(has_json_extension(Path::new("a.JSON")));
        assert!(!has_json_extension(Path::new("a.txt")));
        assert!(!has_json_extension(Path::new("json")));
    }
}
