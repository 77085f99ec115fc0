//! Paddle PULC writer.
//!
//! PULC training lists are plain UTF-8 text, one example per line:
//!
//! ```text
//! images/0001.jpg<TAB>cat
//! images/0002.jpg<TAB>cat,dog
//! ```
//!
//! There is no header row and no trailing newline. The output always lands
//! in `result.txt` inside the output directory.

use std::fs;

use super::{ConvertOptions, ConvertRequest, FormatConverter};
use crate::error::LabelportError;
use crate::records::{self, prettify_value, AnnotationRecord};

/// Name of the file written inside the output directory.
pub const PULC_RESULT_FILE: &str = "result.txt";

/// Writes records as a PULC classification list.
#[derive(Clone, Copy, Debug, Default)]
pub struct PulcConverter;

impl FormatConverter for PulcConverter {
    fn convert(&self, request: &ConvertRequest<'_>) -> Result<(), LabelportError> {
        fs::create_dir_all(request.output).map_err(LabelportError::Io)?;
        let output_file = request.output.join(PULC_RESULT_FILE);

        let source = records::iter_records(request.input, request.is_dir, request.schema)?;
        let mut lines = Vec::new();
        for (index, record) in source.enumerate() {
            lines.push(pulc_line(&record?, index, request.options)?);
        }

        log::info!(
            "writing {} PULC line(s) to {}",
            lines.len(),
            output_file.display()
        );
        fs::write(&output_file, lines.join("\n")).map_err(LabelportError::Io)
    }
}

/// Formats one record as `<image><TAB><choices>`.
pub fn pulc_line(
    record: &AnnotationRecord,
    index: usize,
    options: &ConvertOptions,
) -> Result<String, LabelportError> {
    let image = record
        .input
        .get(&options.image_key)
        .ok_or_else(|| LabelportError::MissingRecordField {
            index,
            field: format!("input.{}", options.image_key),
        })?;
    let choice = record
        .output
        .get(&options.choice_key)
        .ok_or_else(|| LabelportError::MissingRecordField {
            index,
            field: format!("output.{}", options.choice_key),
        })?;

    Ok(format!("{}\t{}", prettify_value(image), prettify_value(choice)))
}
