//! Schema classification.
//!
//! Reduces a [`Schema`] to the distinct input and output tag types it uses,
//! which is all the format selector needs to know about a project.

mod report;

pub use report::{Diagnostic, DiagnosticCode};

use std::collections::BTreeSet;

use serde::Serialize;

use crate::schema::Schema;

/// Tag types in use by a schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TagTypeSets {
    pub output_tag_types: BTreeSet<String>,
    pub input_tag_types: BTreeSet<String>,
    /// True if any input takes a list of values.
    pub is_multi_value_input: bool,
    /// Inputs that were left out of `input_tag_types`, and why.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl TagTypeSets {
    /// Builds sets directly from tag type names.
    pub fn new<I, O>(input_tag_types: I, output_tag_types: O, is_multi_value_input: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            output_tag_types: output_tag_types.into_iter().map(Into::into).collect(),
            input_tag_types: input_tag_types.into_iter().map(Into::into).collect(),
            is_multi_value_input,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_input(&self, tag_type: &str) -> bool {
        self.input_tag_types.contains(tag_type)
    }

    pub fn has_output(&self, tag_type: &str) -> bool {
        self.output_tag_types.contains(tag_type)
    }
}

/// Classifies a schema into its tag type sets.
///
/// `Text` inputs with `valueType="url"` are left out of the input set and
/// reported as [`DiagnosticCode::UnsupportedTagCombination`]; classification
/// itself never fails.
pub fn classify(schema: &Schema) -> TagTypeSets {
    let mut sets = TagTypeSets::default();

    for (name, output) in schema {
        sets.output_tag_types.insert(output.tag_type.clone());

        for (index, input) in output.inputs.iter().enumerate() {
            if input.value_list {
                sets.is_multi_value_input = true;
            }

            if input.tag_type == "Text" && input.value_type.as_deref() == Some("url") {
                log::warn!(
                    "valueType=\"url\" is not supported for text inputs (output tag '{}')",
                    name
                );
                sets.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::UnsupportedTagCombination,
                    "valueType=\"url\" is not supported for text inputs",
                    name.as_str(),
                    index,
                ));
                continue;
            }

            sets.input_tag_types.insert(input.tag_type.clone());
        }
    }

    sets
}
