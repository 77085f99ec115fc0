//! Labeling-project schema.
//!
//! A [`Schema`] maps each output (control) tag name to its type and the
//! input (object) tags it annotates. It is usually derived from a Label
//! Studio XML labeling config via [`label_config`], or loaded from a JSON
//! dump of the same mapping via [`io_json`].
//!
//! [`LabelConfig`] narrows a schema to the output tags being exported and
//! records the task data keys those tags read from.

pub mod io_json;
pub mod label_config;

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Output-tag name to tag description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    tags: BTreeMap<String, OutputTag>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an output tag.
    pub fn insert(&mut self, name: impl Into<String>, tag: OutputTag) {
        self.tags.insert(name.into(), tag);
    }

    /// Looks up an output tag by name.
    pub fn get(&self, name: &str) -> Option<&OutputTag> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Iterates output tags in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, OutputTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<(String, OutputTag)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, OutputTag)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a OutputTag);
    type IntoIter = btree_map::Iter<'a, String, OutputTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// An output (control) tag such as `RectangleLabels` or `Choices`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTag {
    #[serde(rename = "type")]
    pub tag_type: String,
    #[serde(default)]
    pub to_name: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<InputTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl OutputTag {
    pub fn new(tag_type: impl Into<String>) -> Self {
        Self {
            tag_type: tag_type.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to attach an input tag.
    pub fn with_input(mut self, input: InputTag) -> Self {
        self.inputs.push(input);
        self
    }
}

/// An input (object) tag such as `Image` or `Text`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTag {
    #[serde(rename = "type")]
    pub tag_type: String,
    /// Task data key the tag reads from, without the leading `$`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        default,
        rename = "valueType",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_type: Option<String>,
    /// True when the tag takes a list of values rather than a scalar.
    #[serde(
        default,
        rename = "valueList",
        deserialize_with = "deserialize_truthy",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub value_list: bool,
}

impl InputTag {
    pub fn new(tag_type: impl Into<String>) -> Self {
        Self {
            tag_type: tag_type.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    pub fn with_value_list(mut self, value_list: bool) -> Self {
        self.value_list = value_list;
        self
    }
}

// Label Studio stores `valueList` as the data key string; schema dumps may
// also carry a plain bool.
fn deserialize_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// A schema narrowed to the exported output tags, plus the data keys they use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelConfig {
    pub schema: Schema,
    pub data_keys: BTreeSet<String>,
    /// True when built from a project schema. Task expansion then keeps
    /// only results of `schema`'s output tags, even when none are left.
    /// The default config restricts nothing.
    pub restricts_outputs: bool,
}

impl LabelConfig {
    /// Builds a config from a full schema.
    ///
    /// When `output_tags` is given, only those output tags are kept; names
    /// that do not exist in the schema are ignored.
    pub fn new(schema: Schema, output_tags: Option<&[String]>) -> Self {
        if let Some(wanted) = output_tags {
            for name in wanted {
                if !schema.contains(name) {
                    log::debug!(
                        "output tag '{}' not found in schema; available: {:?}",
                        name,
                        schema.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>()
                    );
                }
            }
        }

        let schema: Schema = schema
            .tags
            .into_iter()
            .filter(|(name, _)| output_tags.is_none_or(|wanted| wanted.contains(name)))
            .collect();

        let data_keys = schema
            .iter()
            .flat_map(|(_, tag)| tag.inputs.iter())
            .filter_map(|input| input.value.clone())
            .collect();

        Self {
            schema,
            data_keys,
            restricts_outputs: true,
        }
    }

    /// True when the exported tags read from more than one task data key.
    pub fn has_multiple_data_keys(&self) -> bool {
        self.data_keys.len() > 1
    }

    /// The schema task expansion filters against, if any.
    pub fn output_filter(&self) -> Option<&Schema> {
        self.restricts_outputs.then_some(&self.schema)
    }

    /// Names of the exported output tags.
    pub fn output_tags(&self) -> impl Iterator<Item = &str> {
        self.schema.iter().map(|(name, _)| name.as_str())
    }
}
