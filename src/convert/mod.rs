//! Record-to-format conversion.
//!
//! [`Converter`] owns a dispatch table from [`Format`] to a
//! [`FormatConverter`]. [`Format::Pulc`] maps to [`PulcConverter`]; every
//! other format maps to a [`LibraryConverter`] that hands the request to the
//! configured [`ExportLibrary`] unchanged.
//!
//! Format names are resolved before anything touches the filesystem, so an
//! unknown name fails with [`LabelportError::InvalidFormat`] and writes
//! nothing.

pub mod library;
pub mod pulc;

pub use library::{ExportLibrary, LibraryConverter, StructuralLibrary};
pub use pulc::{PulcConverter, PULC_RESULT_FILE};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::error::LabelportError;
use crate::format::Format;
use crate::schema::{LabelConfig, Schema};
use crate::select;

/// Default record field holding the image reference.
pub const DEFAULT_IMAGE_KEY: &str = "image";

/// Default record field holding the classification result.
pub const DEFAULT_CHOICE_KEY: &str = "choice";

/// Per-call conversion options.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    /// Input field written as the first PULC column.
    pub image_key: String,
    /// Output field written as the second PULC column.
    pub choice_key: String,
    /// Library-specific options, passed through untouched.
    pub extra: BTreeMap<String, Value>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image_key: DEFAULT_IMAGE_KEY.to_string(),
            choice_key: DEFAULT_CHOICE_KEY.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Everything a format converter needs for one conversion.
#[derive(Clone, Copy, Debug)]
pub struct ConvertRequest<'a> {
    pub format: Format,
    /// Record source: a directory of JSON files or a single JSON file.
    pub input: &'a Path,
    /// Output directory.
    pub output: &'a Path,
    pub is_dir: bool,
    /// Exported part of the project schema; `None` when no schema was
    /// supplied, which disables output-tag filtering during task expansion.
    pub schema: Option<&'a Schema>,
    /// Where uploaded task files live, for libraries that copy resources.
    pub upload_dir: Option<&'a Path>,
    /// Whether libraries may download task resources.
    pub download_resources: bool,
    pub options: &'a ConvertOptions,
}

/// Serializes records into one export format.
pub trait FormatConverter: Send + Sync {
    fn convert(&self, request: &ConvertRequest<'_>) -> Result<(), LabelportError>;
}

/// Format-aware export entry point for one project.
pub struct Converter {
    config: LabelConfig,
    upload_dir: Option<PathBuf>,
    download_resources: bool,
    converters: BTreeMap<Format, Box<dyn FormatConverter>>,
}

impl Converter {
    /// Creates a converter backed by [`StructuralLibrary`].
    pub fn new(config: LabelConfig) -> Self {
        Self::with_library(config, Arc::new(StructuralLibrary))
    }

    /// Creates a converter that forwards standard formats to `library`.
    pub fn with_library(config: LabelConfig, library: Arc<dyn ExportLibrary>) -> Self {
        let converters = Format::ALL
            .into_iter()
            .map(|format| {
                let converter: Box<dyn FormatConverter> = if format.is_custom() {
                    Box::new(PulcConverter)
                } else {
                    Box::new(LibraryConverter::new(Arc::clone(&library)))
                };
                (format, converter)
            })
            .collect();

        Self {
            config,
            upload_dir: None,
            download_resources: true,
            converters,
        }
    }

    /// Sets the directory uploaded task files are resolved against.
    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(upload_dir.into());
        self
    }

    /// Enables or disables resource downloads in the export library.
    pub fn with_download_resources(mut self, download_resources: bool) -> Self {
        self.download_resources = download_resources;
        self
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Formats that may be offered for this project, in catalog order.
    pub fn supported_formats(&self) -> Vec<Format> {
        select::supported_formats(&self.config)
    }

    /// Converts records at `input` into `format_name`, writing under `output`.
    ///
    /// # Errors
    /// Returns [`LabelportError::InvalidFormat`] for unknown format names,
    /// before any filesystem access. Filesystem and parse errors propagate.
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        format_name: &str,
        is_dir: bool,
        options: &ConvertOptions,
    ) -> Result<(), LabelportError> {
        let format = Format::from_name(format_name)?;
        self.convert_to(input, output, format, is_dir, options)
    }

    /// Converts records at `input` into an already-resolved format.
    pub fn convert_to(
        &self,
        input: &Path,
        output: &Path,
        format: Format,
        is_dir: bool,
        options: &ConvertOptions,
    ) -> Result<(), LabelportError> {
        let converter = self
            .converters
            .get(&format)
            .ok_or_else(|| LabelportError::InvalidFormat(format.name().to_string()))?;

        log::info!(
            "converting {} ({}) to {} in {}",
            input.display(),
            if is_dir { "directory" } else { "file" },
            format,
            output.display()
        );

        converter.convert(&ConvertRequest {
            format,
            input,
            output,
            is_dir,
            schema: self.config.output_filter(),
            upload_dir: self.upload_dir.as_deref(),
            download_resources: self.download_resources,
            options,
        })
    }
}
