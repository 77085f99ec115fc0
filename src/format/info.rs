//! Static descriptive metadata for each export format.

use serde::Serialize;

use super::Format;

/// Display metadata for one export format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    #[serde(skip_serializing_if = "has_no_tags")]
    pub tags: &'static [&'static str],
}

fn has_no_tags(tags: &&'static [&'static str]) -> bool {
    tags.is_empty()
}

const DETECTION_TAGS: &[&str] = &["image segmentation", "object detection"];
const SEGMENTATION_TAGS: &[&str] = &["image segmentation"];

// Indexed by `Format as usize`; entries must stay in declaration order.
static CATALOG: [FormatInfo; 13] = [
    FormatInfo {
        title: "JSON",
        description: "List of items in raw JSON format stored in one JSON file. Use to export both \
                      the data and the annotations for a dataset. It's Label Studio Common Format",
        link: "https://labelstud.io/guide/export.html#JSON",
        tags: &[],
    },
    FormatInfo {
        title: "JSON-MIN",
        description: "List of items where only \"from_name\", \"to_name\" values from the raw JSON \
                      format are exported. Use to export only the annotations for a dataset.",
        link: "https://labelstud.io/guide/export.html#JSON-MIN",
        tags: &[],
    },
    FormatInfo {
        title: "CSV",
        description: "Results are stored as comma-separated values with the column names specified \
                      by the values of the \"from_name\" and \"to_name\" fields.",
        link: "https://labelstud.io/guide/export.html#CSV",
        tags: &[],
    },
    FormatInfo {
        title: "TSV",
        description: "Results are stored in tab-separated tabular file with column names specified \
                      by \"from_name\" \"to_name\" values",
        link: "https://labelstud.io/guide/export.html#TSV",
        tags: &[],
    },
    FormatInfo {
        title: "CONLL2003",
        description: "Popular format used for the CoNLL-2003 named entity recognition challenge.",
        link: "https://labelstud.io/guide/export.html#CONLL2003",
        tags: &[
            "sequence labeling",
            "text tagging",
            "named entity recognition",
        ],
    },
    FormatInfo {
        title: "COCO",
        description: "Popular machine learning format used by the COCO dataset for object \
                      detection and image segmentation tasks with polygons and rectangles.",
        link: "https://labelstud.io/guide/export.html#COCO",
        tags: DETECTION_TAGS,
    },
    FormatInfo {
        title: "Pascal VOC XML",
        description: "Popular XML format used for object detection and polygon image segmentation \
                      tasks.",
        link: "https://labelstud.io/guide/export.html#Pascal-VOC-XML",
        tags: DETECTION_TAGS,
    },
    FormatInfo {
        title: "Brush labels to NumPy",
        description: "Export your brush labels as NumPy 2d arrays. Each label outputs as one image.",
        link: "https://labelstud.io/guide/export.html#Brush-labels-to-NumPy-amp-PNG",
        tags: SEGMENTATION_TAGS,
    },
    FormatInfo {
        title: "Brush labels to PNG",
        description: "Export your brush labels as PNG images. Each label outputs as one image.",
        link: "https://labelstud.io/guide/export.html#Brush-labels-to-NumPy-amp-PNG",
        tags: SEGMENTATION_TAGS,
    },
    FormatInfo {
        title: "ASR Manifest",
        description: "Export audio transcription labels for automatic speech recognition as the \
                      JSON manifest format expected by NVIDIA NeMo models.",
        link: "https://labelstud.io/guide/export.html#ASR-MANIFEST",
        tags: &["speech recognition"],
    },
    FormatInfo {
        title: "YOLO",
        description: "Popular TXT format is created for each image file. Each txt file contains \
                      annotations for the corresponding image file, that is object class, object \
                      coordinates, height & width.",
        link: "https://labelstud.io/guide/export.html#YOLO",
        tags: DETECTION_TAGS,
    },
    FormatInfo {
        title: "YOLOv8 OBB",
        description: "Popular TXT format is created for each image file. Each txt file contains \
                      annotations for the corresponding image file. The YOLO OBB format designates \
                      bounding boxes by their four corner points with coordinates normalized \
                      between 0 and 1, so it is possible to export rotated objects.",
        link: "https://labelstud.io/guide/export.html#YOLO",
        tags: DETECTION_TAGS,
    },
    FormatInfo {
        title: "Paddle PULC",
        description: "The results are stored as \\t-separated values with column names specified \
                      by the values of the \u{201c}from_name\u{201d} and \u{201c}to_name\u{201d} \
                      fields.",
        link: "https://github.com/PaddlePaddle/PaddleClas/blob/release/2.6/docs/zh_CN/training/PULC.md",
        tags: SEGMENTATION_TAGS,
    },
];

pub(super) fn lookup(format: Format) -> &'static FormatInfo {
    &CATALOG[format as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_has_a_title_and_link() {
        for format in Format::ALL {
            let info = format.info();
            assert!(!info.title.is_empty(), "{format} has no title");
            assert!(info.link.starts_with("https://"), "{format} link");
        }
    }

    #[test]
    fn table_is_keyed_in_declaration_order() {
        assert_eq!(Format::Json.info().title, "JSON");
        assert_eq!(Format::Voc.info().title, "Pascal VOC XML");
        assert_eq!(Format::YoloObb.info().title, "YOLOv8 OBB");
        assert_eq!(Format::Pulc.info().title, "Paddle PULC");
    }

    #[test]
    fn structural_formats_carry_no_tags() {
        assert!(Format::Csv.info().tags.is_empty());
        assert_eq!(Format::AsrManifest.info().tags, ["speech recognition"]);
    }

    #[test]
    fn empty_tags_are_omitted_from_json() {
        let json = serde_json::to_string(Format::Tsv.info()).unwrap();
        assert!(!json.contains("\"tags\""));
        let json = serde_json::to_string(Format::Coco.info()).unwrap();
        assert!(json.contains("\"object detection\""));
    }
}
