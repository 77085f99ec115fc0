//! Export format selection.
//!
//! Each format is offered only when the project's tag types satisfy that
//! format's structural prerequisites. The prerequisites live in [`RULES`],
//! one entry per format in catalog order, so the selected list always
//! follows [`Format::ALL`].

use crate::classify::{self, TagTypeSets};
use crate::format::Format;
use crate::schema::LabelConfig;

/// Eligibility rule for one format.
#[derive(Clone, Copy)]
pub struct FormatRule {
    pub format: Format,
    /// Tag-shape prerequisite.
    pub requires: fn(&TagTypeSets) -> bool,
    /// Whether a list-valued input disqualifies the format.
    pub rejects_multi_value_input: bool,
}

impl FormatRule {
    /// True if the format may be offered for these tag types.
    pub fn admits(&self, sets: &TagTypeSets) -> bool {
        if self.rejects_multi_value_input && sets.is_multi_value_input {
            return false;
        }
        (self.requires)(sets)
    }
}

const fn rule(format: Format, requires: fn(&TagTypeSets) -> bool) -> FormatRule {
    FormatRule {
        format,
        requires,
        rejects_multi_value_input: false,
    }
}

const fn positional_rule(format: Format, requires: fn(&TagTypeSets) -> bool) -> FormatRule {
    FormatRule {
        format,
        requires,
        rejects_multi_value_input: true,
    }
}

/// Eligibility rules, in catalog order.
pub static RULES: [FormatRule; 13] = [
    rule(Format::Json, always),
    rule(Format::JsonMin, always),
    rule(Format::Csv, always),
    rule(Format::Tsv, always),
    rule(Format::Conll2003, sequence_labeling),
    positional_rule(Format::Coco, detection_or_segmentation),
    positional_rule(Format::Voc, rectangle_detection),
    rule(Format::BrushToNumpy, brush_masks),
    rule(Format::BrushToPng, brush_masks),
    rule(Format::AsrManifest, speech_transcript),
    positional_rule(Format::Yolo, detection_or_segmentation),
    positional_rule(Format::YoloObb, not_video_timeline),
    rule(Format::Pulc, always),
];

fn always(_: &TagTypeSets) -> bool {
    true
}

fn sequence_labeling(sets: &TagTypeSets) -> bool {
    sets.has_input("Text") && sets.has_output("Labels")
}

fn rectangle_detection(sets: &TagTypeSets) -> bool {
    sets.has_input("Image")
        && (sets.has_output("RectangleLabels")
            || (sets.has_output("Rectangle") && sets.has_output("Labels")))
}

// The two trailing alternatives do not require an Image input.
fn detection_or_segmentation(sets: &TagTypeSets) -> bool {
    (sets.has_input("Image")
        && (sets.has_output("RectangleLabels") || sets.has_output("PolygonLabels")))
        || (sets.has_output("Rectangle") && sets.has_output("Labels"))
        || (sets.has_output("PolygonLabels") && sets.has_output("Labels"))
}

fn brush_masks(sets: &TagTypeSets) -> bool {
    sets.has_input("Image")
        && (sets.has_output("BrushLabels")
            || sets.has_output("brushlabels")
            || (sets.has_output("Brush") && sets.has_output("Labels")))
}

fn speech_transcript(sets: &TagTypeSets) -> bool {
    (sets.has_input("Audio") || sets.has_input("AudioPlus")) && sets.has_output("TextArea")
}

fn not_video_timeline(sets: &TagTypeSets) -> bool {
    !(sets.has_input("Video") && sets.has_output("TimelineLabels"))
}

/// Selects the formats that may be offered for export.
///
/// Projects with more than one data key only get the structural formats,
/// since their records cannot be flattened into a single tag-shaped file.
/// An empty result is not an error.
pub fn select_formats(sets: &TagTypeSets, has_multiple_data_keys: bool) -> Vec<Format> {
    if has_multiple_data_keys {
        return Format::STRUCTURAL.to_vec();
    }

    RULES
        .iter()
        .filter(|rule| rule.admits(sets))
        .map(|rule| rule.format)
        .collect()
}

/// Classifies a label config and selects its eligible formats.
pub fn supported_formats(config: &LabelConfig) -> Vec<Format> {
    let sets = classify::classify(&config.schema);
    select_formats(&sets, config.has_multiple_data_keys())
}
