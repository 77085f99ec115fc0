//! Label Studio XML labeling-config parser.
//!
//! A labeling config is an XML tree of object tags (inputs, e.g.
//! `<Image name="img" value="$image"/>`) and control tags (outputs, e.g.
//! `<RectangleLabels name="label" toName="img">`). Label values are
//! collected from `<Label>`, `<Choice>` and `<Relation>` children of a
//! control tag.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use roxmltree::Node;

use super::{InputTag, OutputTag, Schema};
use crate::error::LabelportError;

/// Tags that carry `toName` but do not produce annotations.
const NOT_CONTROL_TAGS: &[&str] = &["Filter"];

/// Tags whose `value`/`alias` names a label of the enclosing control tag.
const LABEL_TAGS: &[&str] = &["Label", "Choice", "Relation"];

/// Reads a labeling config from an XML file.
pub fn read_label_config(path: &Path) -> Result<Schema, LabelportError> {
    let xml = fs::read_to_string(path).map_err(LabelportError::Io)?;
    parse_label_config(&xml, path)
}

/// Parses a labeling config from a string.
pub fn from_label_config_str(xml: &str) -> Result<Schema, LabelportError> {
    parse_label_config(xml, Path::new("<string>"))
}

/// Parses a labeling config from bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_label_config_slice(bytes: &[u8]) -> Result<Schema, LabelportError> {
    let path = Path::new("<bytes>");
    let xml = std::str::from_utf8(bytes).map_err(|source| LabelportError::LabelConfigParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    parse_label_config(xml, path)
}

fn parse_label_config(xml: &str, path: &Path) -> Result<Schema, LabelportError> {
    if xml.trim().is_empty() {
        return Ok(Schema::new());
    }

    let document =
        roxmltree::Document::parse(xml).map_err(|source| LabelportError::LabelConfigParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let mut outputs: BTreeMap<String, OutputTag> = BTreeMap::new();
    let mut inputs: BTreeMap<String, InputTag> = BTreeMap::new();

    for node in document.descendants().filter(Node::is_element) {
        let tag_name = node.tag_name().name();

        if let Some(name) = output_tag_name(node) {
            let to_name = node
                .attribute("toName")
                .unwrap_or_default()
                .split(',')
                .map(str::to_string)
                .collect();
            outputs.insert(
                name.to_string(),
                OutputTag {
                    tag_type: tag_name.to_string(),
                    to_name,
                    ..Default::default()
                },
            );
        } else if let Some((name, value)) = input_tag_name(node) {
            inputs.insert(
                name.to_string(),
                InputTag {
                    tag_type: tag_name.to_string(),
                    value: Some(value.trim_start_matches('$').to_string()),
                    value_type: node.attribute("valueType").map(str::to_string),
                    value_list: node.attribute("valueList").is_some_and(|v| !v.is_empty()),
                },
            );
        }

        if !LABEL_TAGS.iter().any(|label_tag| *label_tag == tag_name) {
            continue;
        }
        let Some(parent) = enclosing_output(node, &outputs) else {
            continue;
        };
        match node.attribute("alias").or_else(|| node.attribute("value")) {
            Some(label) if !label.is_empty() => {
                if let Some(output) = outputs.get_mut(&parent) {
                    if !output.labels.iter().any(|existing| existing == label) {
                        output.labels.push(label.to_string());
                    }
                }
            }
            _ => log::debug!("<{}> under '{}' has no value; skipped", tag_name, parent),
        }
    }

    for (name, output) in outputs.iter_mut() {
        for input_name in &output.to_name {
            match inputs.get(input_name) {
                Some(input) => output.inputs.push(input.clone()),
                None => log::info!(
                    "toName={} is specified for output tag name={}, but it is not among input tags",
                    input_name,
                    name
                ),
            }
        }
    }

    Ok(outputs.into_iter().collect())
}

fn output_tag_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let name = node.attribute("name").filter(|n| !n.is_empty())?;
    node.attribute("toName").filter(|t| !t.is_empty())?;
    let tag_name = node.tag_name().name();
    if NOT_CONTROL_TAGS.iter().any(|skipped| *skipped == tag_name) {
        return None;
    }
    Some(name)
}

fn input_tag_name<'a>(node: Node<'a, '_>) -> Option<(&'a str, &'a str)> {
    let name = node.attribute("name").filter(|n| !n.is_empty())?;
    let value = node
        .attribute("value")
        .filter(|v| !v.is_empty())
        .or_else(|| node.attribute("valueList").filter(|v| !v.is_empty()))?;
    Some((name, value))
}

fn enclosing_output(node: Node<'_, '_>, outputs: &BTreeMap<String, OutputTag>) -> Option<String> {
    node.ancestors()
        .skip(1)
        .filter_map(|ancestor| ancestor.attribute("name"))
        .find(|name| outputs.contains_key(*name))
        .map(str::to_string)
}
