//! Diagnostics emitted while classifying a schema.

use std::fmt;

use serde::Serialize;

/// A non-fatal problem found in a schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// A stable code for the diagnostic type.
    pub code: DiagnosticCode,

    /// A human-readable description.
    pub message: String,

    /// Output tag the offending input belongs to.
    pub output_tag: String,

    /// Position of the offending input under its output tag.
    pub input_index: usize,
}

impl Diagnostic {
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        output_tag: impl Into<String>,
        input_index: usize,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            output_tag: output_tag.into(),
            input_index,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[WARN ] {:?} in output '{}' input {}: {}",
            self.code, self.output_tag, self.input_index, self.message
        )
    }
}

/// Stable diagnostic codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A `Text` input declares `valueType="url"`; no text format accepts it.
    UnsupportedTagCombination,
}
