//! Labelport: export-format eligibility and conversion for labeling projects.
//!
//! Given a project's labeling schema, labelport decides which export formats
//! make sense for it, and converts annotation records into the chosen
//! format. Standard formats are delegated to an export library; the Paddle
//! PULC classification list is written directly.
//!
//! # Modules
//!
//! - [`format`]: The export format catalog and its metadata
//! - [`schema`]: Schema types and the labeling-config parser
//! - [`classify`]: Schema to tag-type sets
//! - [`select`]: Tag-type sets to eligible formats
//! - [`records`]: Annotation record sources
//! - [`convert`]: Format dispatch and the PULC writer
//! - [`error`]: Error types for labelport operations

pub mod classify;
pub mod convert;
pub mod error;
pub mod format;
pub mod records;
pub mod schema;
pub mod select;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub use classify::{classify, Diagnostic, TagTypeSets};
pub use convert::{ConvertOptions, Converter};
pub use error::LabelportError;
pub use format::{Format, FormatInfo};
pub use schema::{LabelConfig, Schema};
pub use select::{select_formats, supported_formats};

/// The labelport CLI application.
#[derive(Parser)]
#[command(name = "labelport")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the export formats available for a labeling config.
    Formats(FormatsArgs),
    /// Convert annotation records into an export format.
    Convert(ConvertArgs),
}

/// Where the project schema comes from.
#[derive(clap::Args)]
#[group(multiple = false)]
struct SchemaArgs {
    /// Label Studio XML labeling config.
    #[arg(long, env = "LABELPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Schema JSON (output tag name to type and inputs).
    #[arg(long, env = "LABELPORT_SCHEMA")]
    schema: Option<PathBuf>,
}

/// Arguments for the formats subcommand.
#[derive(clap::Args)]
struct FormatsArgs {
    #[command(flatten)]
    source: SchemaArgs,

    /// Only consider these output tags (comma-separated).
    #[arg(long, value_delimiter = ',')]
    output_tags: Option<Vec<String>>,

    /// List the whole catalog instead of the eligible formats.
    #[arg(long)]
    all: bool,

    /// Output format for the listing.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    output: ReportFormat,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    #[command(flatten)]
    source: SchemaArgs,

    /// Only export these output tags (comma-separated).
    #[arg(long, value_delimiter = ',')]
    output_tags: Option<Vec<String>>,

    /// Record source: a directory of JSON files, or a JSON file with --from-file.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory.
    #[arg(short, long)]
    output: PathBuf,

    /// Target format name (e.g. JSON, CSV, PULC).
    #[arg(short, long)]
    format: String,

    /// Treat --input as a single aggregate JSON file.
    #[arg(long)]
    from_file: bool,

    /// Record input field holding the image reference (PULC).
    #[arg(long, default_value = convert::DEFAULT_IMAGE_KEY)]
    image_key: String,

    /// Record output field holding the choices (PULC).
    #[arg(long, default_value = convert::DEFAULT_CHOICE_KEY)]
    choice_key: String,

    /// Directory uploaded task files are resolved against.
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Do not let the export library download task resources.
    #[arg(long)]
    no_download: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the labelport CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelportError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Formats(args)) => run_formats(args),
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("labelport {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Export-format eligibility and conversion for labeling projects.");
            println!();
            println!("Run 'labelport --help' for usage information.");
            Ok(())
        }
    }
}

/// Loads the schema named on the command line, if any.
fn load_schema(source: &SchemaArgs) -> Result<Option<Schema>, LabelportError> {
    match (&source.config, &source.schema) {
        (Some(path), _) => schema::label_config::read_label_config(path).map(Some),
        (None, Some(path)) => schema::io_json::read_schema_json(path).map(Some),
        (None, None) => Ok(None),
    }
}

#[derive(Serialize)]
struct FormatEntry {
    name: Format,
    #[serde(flatten)]
    info: &'static FormatInfo,
}

impl From<Format> for FormatEntry {
    fn from(format: Format) -> Self {
        Self {
            name: format,
            info: format.info(),
        }
    }
}

#[derive(Serialize)]
struct FormatsReport {
    formats: Vec<FormatEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_types: Option<TagTypeSets>,
}

/// Execute the formats subcommand.
fn run_formats(args: FormatsArgs) -> Result<(), LabelportError> {
    let report = if args.all {
        FormatsReport {
            formats: Format::ALL.into_iter().map(FormatEntry::from).collect(),
            tag_types: None,
        }
    } else {
        let schema = load_schema(&args.source)?.ok_or(LabelportError::MissingSchema)?;
        let config = LabelConfig::new(schema, args.output_tags.as_deref());
        let sets = classify(&config.schema);
        let formats = select_formats(&sets, config.has_multiple_data_keys());

        if args.output == ReportFormat::Text {
            for diagnostic in &sets.diagnostics {
                eprintln!("{}", diagnostic);
            }
        }

        FormatsReport {
            formats: formats.into_iter().map(FormatEntry::from).collect(),
            tag_types: Some(sets),
        }
    };

    match args.output {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                LabelportError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        ReportFormat::Text => {
            if report.formats.is_empty() {
                println!("No export formats available");
            }
            for entry in &report.formats {
                println!("{:<16}{}", entry.name.name(), entry.info.title);
            }
        }
    }

    Ok(())
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), LabelportError> {
    let config = match load_schema(&args.source)? {
        Some(schema) => LabelConfig::new(schema, args.output_tags.as_deref()),
        None => {
            if args.output_tags.is_some() {
                log::warn!("--output-tags ignored without --config or --schema");
            }
            LabelConfig::default()
        }
    };

    let mut converter = Converter::new(config).with_download_resources(!args.no_download);
    if let Some(upload_dir) = &args.upload_dir {
        converter = converter.with_upload_dir(upload_dir);
    }

    let options = ConvertOptions {
        image_key: args.image_key,
        choice_key: args.choice_key,
        ..Default::default()
    };

    converter.convert(
        &args.input,
        &args.output,
        &args.format,
        !args.from_file,
        &options,
    )?;

    println!(
        "Converted {} to {} in {}",
        args.input.display(),
        args.format,
        args.output.display()
    );
    Ok(())
}
