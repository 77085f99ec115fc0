#![allow(dead_code)]

use labelport::schema::{InputTag, OutputTag, Schema};
use labelport::TagTypeSets;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const INPUT_TAG_TYPES: &[&str] = &[
    "Image",
    "Text",
    "HyperText",
    "Audio",
    "AudioPlus",
    "Video",
    "TimeSeries",
];

pub const OUTPUT_TAG_TYPES: &[&str] = &[
    "Labels",
    "Choices",
    "TextArea",
    "Rectangle",
    "RectangleLabels",
    "PolygonLabels",
    "Brush",
    "BrushLabels",
    "brushlabels",
    "KeyPointLabels",
    "TimelineLabels",
];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

fn arb_tag_subset(types: &'static [&'static str]) -> BoxedStrategy<Vec<&'static str>> {
    proptest::sample::subsequence(types, 0..=types.len()).boxed()
}

pub fn arb_tag_type_sets() -> BoxedStrategy<TagTypeSets> {
    (
        arb_tag_subset(INPUT_TAG_TYPES),
        arb_tag_subset(OUTPUT_TAG_TYPES),
        any::<bool>(),
    )
        .prop_map(|(inputs, outputs, multi)| TagTypeSets::new(inputs, outputs, multi))
        .boxed()
}

fn arb_input_tag() -> BoxedStrategy<InputTag> {
    (
        proptest::sample::select(INPUT_TAG_TYPES),
        proptest::option::of(Just("url")),
        any::<bool>(),
    )
        .prop_map(|(tag_type, value_type, value_list)| {
            let mut input = InputTag::new(tag_type).with_value_list(value_list);
            if let Some(value_type) = value_type {
                input = input.with_value_type(value_type);
            }
            input
        })
        .boxed()
}

pub fn arb_schema(max_outputs: usize) -> BoxedStrategy<Schema> {
    proptest::collection::vec(
        (
            proptest::sample::select(OUTPUT_TAG_TYPES),
            proptest::collection::vec(arb_input_tag(), 0..3),
        ),
        0..=max_outputs,
    )
    .prop_map(|outputs| {
        outputs
            .into_iter()
            .enumerate()
            .map(|(index, (tag_type, inputs))| {
                let mut output = OutputTag::new(tag_type);
                output.inputs = inputs;
                (format!("tag{index}"), output)
            })
            .collect()
    })
    .boxed()
}
