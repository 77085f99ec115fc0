//! The export library seam.
//!
//! Standard formats are serialized by an [`ExportLibrary`]. labelport does
//! not reimplement them; it only routes requests. [`StructuralLibrary`] is
//! the library used when none is supplied: it writes the four structural
//! formats and refuses the tag-shaped ones.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{ConvertRequest, FormatConverter};
use crate::error::LabelportError;
use crate::format::Format;
use crate::records::{self, AnnotationRecord};

/// A provider of standard-format serializers.
pub trait ExportLibrary: Send + Sync {
    /// Converts the request's records into `request.format`.
    fn convert(&self, request: &ConvertRequest<'_>) -> Result<(), LabelportError>;
}

/// Forwards a format to the export library untouched.
#[derive(Clone)]
pub struct LibraryConverter {
    library: Arc<dyn ExportLibrary>,
}

impl LibraryConverter {
    pub fn new(library: Arc<dyn ExportLibrary>) -> Self {
        Self { library }
    }
}

impl FormatConverter for LibraryConverter {
    fn convert(&self, request: &ConvertRequest<'_>) -> Result<(), LabelportError> {
        self.library.convert(request)
    }
}

/// Annotation metadata copied into JSON-MIN and tabular rows.
const MIN_EXTRA_FIELDS: &[&str] = &["annotation_id", "created_at", "updated_at", "lead_time"];

/// Output tag types whose single-label results collapse to a scalar.
const SCALAR_TAG_TYPES: &[&str] = &["Choices", "TextArea"];

/// Built-in library for the structural formats.
///
/// | Format | File |
/// |---|---|
/// | JSON | `result.json`, records as read |
/// | JSON_MIN | `result.json`, one flat object per record |
/// | CSV | `result.csv` |
/// | TSV | `result.tsv` |
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralLibrary;

impl ExportLibrary for StructuralLibrary {
    fn convert(&self, request: &ConvertRequest<'_>) -> Result<(), LabelportError> {
        match request.format {
            Format::Json => write_json(request),
            Format::JsonMin => write_json_min(request),
            Format::Csv => write_table(request, b',', "result.csv"),
            Format::Tsv => write_table(request, b'\t', "result.tsv"),
            format => Err(LabelportError::LibraryUnsupported { format }),
        }
    }
}

fn collect_records(request: &ConvertRequest<'_>) -> Result<Vec<AnnotationRecord>, LabelportError> {
    records::iter_records(request.input, request.is_dir, request.schema)?.collect()
}

fn write_json(request: &ConvertRequest<'_>) -> Result<(), LabelportError> {
    let records = collect_records(request)?;
    write_json_file(request.output, &records)
}

fn write_json_min(request: &ConvertRequest<'_>) -> Result<(), LabelportError> {
    let rows: Vec<Map<String, Value>> = collect_records(request)?.iter().map(minify_record).collect();
    write_json_file(request.output, &rows)
}

fn write_json_file<T: serde::Serialize>(output_dir: &Path, value: &T) -> Result<(), LabelportError> {
    fs::create_dir_all(output_dir).map_err(LabelportError::Io)?;
    let path = output_dir.join("result.json");
    let file = File::create(&path).map_err(LabelportError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value)
        .map_err(|source| LabelportError::JsonWrite { path, source })
}

fn write_table(
    request: &ConvertRequest<'_>,
    delimiter: u8,
    file_name: &str,
) -> Result<(), LabelportError> {
    let rows: Vec<Map<String, Value>> = collect_records(request)?.iter().map(minify_record).collect();
    let columns: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();

    fs::create_dir_all(request.output).map_err(LabelportError::Io)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(request.output.join(file_name))?;

    if !columns.is_empty() {
        writer.write_record(&columns)?;
    }
    for row in &rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| row.get(*column).map(cell_text).unwrap_or_default()),
        )?;
    }
    writer.flush().map_err(LabelportError::Io)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Flattens a record into `{id, <data keys>, <output tags>, <metadata>}`.
pub fn minify_record(record: &AnnotationRecord) -> Map<String, Value> {
    let mut row = Map::new();
    if let Some(id) = &record.id {
        row.insert("id".to_string(), id.clone());
    }
    for (key, value) in &record.input {
        row.insert(key.clone(), value.clone());
    }
    for (name, value) in &record.output {
        row.insert(name.clone(), minify_output(value));
    }
    for field in MIN_EXTRA_FIELDS {
        if let Some(value) = record.extra.get(*field) {
            row.insert(field.to_string(), value.clone());
        }
    }
    row
}

/// Drops result bookkeeping and collapses single labels.
///
/// A one-result `Choices`/`TextArea` output becomes its label; any other
/// list of results stays a list.
pub fn minify_output(value: &Value) -> Value {
    let Value::Array(results) = value else {
        return value.clone();
    };

    let mut tag_type = None;
    let minified: Vec<Value> = results
        .iter()
        .map(|result| {
            let Value::Object(result) = result else {
                return result.clone();
            };
            let mut result = result.clone();
            tag_type = result.remove("type");
            let single = ["choices", "text"].iter().find_map(|key| match result.get(*key) {
                Some(Value::Array(labels)) if labels.len() == 1 => Some(labels[0].clone()),
                _ => None,
            });
            single.unwrap_or(Value::Object(result))
        })
        .collect();

    let collapses = tag_type
        .as_ref()
        .and_then(Value::as_str)
        .is_some_and(|t| SCALAR_TAG_TYPES.iter().any(|scalar| *scalar == t));
    match <[Value; 1]>::try_from(minified) {
        Ok([single]) if collapses => single,
        Ok(single) => Value::Array(single.into()),
        Err(minified) => Value::Array(minified),
    }
}
