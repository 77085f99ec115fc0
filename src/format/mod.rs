//! The export format catalog.
//!
//! [`Format`] is the closed set of export targets: the twelve formats the
//! export library serializes, plus [`Format::Pulc`], which labelport writes
//! itself. Every format carries static [`FormatInfo`] metadata for UI and
//! documentation layers.

mod info;

pub use info::FormatInfo;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::LabelportError;

/// An export format identifier.
///
/// Variants are declared in catalog order; [`Format::ALL`] and every list
/// of eligible formats follow this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    Json,
    JsonMin,
    Csv,
    Tsv,
    Conll2003,
    Coco,
    Voc,
    BrushToNumpy,
    BrushToPng,
    AsrManifest,
    Yolo,
    YoloObb,
    /// Paddle PULC classification list, written by labelport.
    Pulc,
}

impl Format {
    /// Every format, in catalog order.
    pub const ALL: [Format; 13] = [
        Format::Json,
        Format::JsonMin,
        Format::Csv,
        Format::Tsv,
        Format::Conll2003,
        Format::Coco,
        Format::Voc,
        Format::BrushToNumpy,
        Format::BrushToPng,
        Format::AsrManifest,
        Format::Yolo,
        Format::YoloObb,
        Format::Pulc,
    ];

    /// Formats that depend only on record structure, never on tag shape.
    pub const STRUCTURAL: [Format; 5] = [
        Format::Json,
        Format::JsonMin,
        Format::Csv,
        Format::Tsv,
        Format::Pulc,
    ];

    /// The identifier used on the wire and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::JsonMin => "JSON_MIN",
            Format::Csv => "CSV",
            Format::Tsv => "TSV",
            Format::Conll2003 => "CONLL2003",
            Format::Coco => "COCO",
            Format::Voc => "VOC",
            Format::BrushToNumpy => "BRUSH_TO_NUMPY",
            Format::BrushToPng => "BRUSH_TO_PNG",
            Format::AsrManifest => "ASR_MANIFEST",
            Format::Yolo => "YOLO",
            Format::YoloObb => "YOLO_OBB",
            Format::Pulc => "PULC",
        }
    }

    /// Resolve an identifier to a format.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// Returns [`LabelportError::InvalidFormat`] for unknown names.
    pub fn from_name(name: &str) -> Result<Format, LabelportError> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| LabelportError::InvalidFormat(name.to_string()))
    }

    /// Static metadata for this format.
    pub fn info(&self) -> &'static FormatInfo {
        info::lookup(*self)
    }

    /// True for the format labelport serializes itself.
    pub fn is_custom(&self) -> bool {
        matches!(self, Format::Pulc)
    }

    /// True for formats whose eligibility never depends on tag shape.
    pub fn is_structural(&self) -> bool {
        Format::STRUCTURAL.contains(self)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = LabelportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_name(s)
    }
}

impl Serialize for Format {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
