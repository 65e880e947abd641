use std::io::Write;
use std::path::PathBuf;

use apienvelope_core::Envelope;
use apienvelope_io::{EnvelopeWriter, IoConfig, DEFAULT_MAX_ENVELOPE_SIZE};
use clap::{Args, Subcommand};

use crate::exit::{io_error, stream_error, CliResult};
use crate::output::OutputFormat;

pub mod build;
pub mod inspect;
pub mod items;
pub mod stamp;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an envelope and print its metadata.
    Inspect(InspectArgs),
    /// Decode an envelope and print each data item in order.
    Items(ItemsArgs),
    /// Assemble an envelope from flags and write it to stdout.
    Build(BuildArgs),
    /// Copy an envelope's version, method and params into a fresh envelope.
    Stamp(StampArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Inspect(args) => inspect::run(args, format),
        Command::Items(args) => items::run(args, format),
        Command::Build(args) => build::run(args),
        Command::Stamp(args) => stamp::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Envelope file to read. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
    /// Maximum accepted envelope size in bytes.
    #[arg(long, env = "APIENVELOPE_MAX_SIZE", default_value_t = DEFAULT_MAX_ENVELOPE_SIZE)]
    pub max_size: usize,
}

impl InputArgs {
    pub fn config(&self) -> IoConfig {
        IoConfig {
            max_envelope_size: self.max_size,
            ..IoConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct ItemsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Stop after printing N items.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// API version.
    #[arg(long)]
    pub api_version: Option<String>,
    /// Correlation value to echo back.
    #[arg(long)]
    pub context: Option<String>,
    /// Request id.
    #[arg(long)]
    pub id: Option<String>,
    /// Method name, for example `cars.get`.
    #[arg(long)]
    pub method: Option<String>,
    /// Request parameter as KEY=VALUE (repeatable).
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
    /// Entity kind of the data items.
    #[arg(long)]
    pub kind: Option<String>,
    /// Field names included in each item (comma-separated, repeatable).
    #[arg(long = "field", value_name = "NAME", value_delimiter = ',')]
    pub fields: Vec<String>,
    /// Data item as a JSON value (repeatable).
    #[arg(long = "item", value_name = "JSON")]
    pub items: Vec<String>,
    /// Language of the data.
    #[arg(long)]
    pub lang: Option<String>,
    /// Last-updated timestamp, passed through verbatim.
    #[arg(long)]
    pub updated: Option<String>,
    /// Etag of the data.
    #[arg(long)]
    pub etag: Option<String>,
    /// Mark the data as deleted.
    #[arg(long)]
    pub deleted: bool,
    /// Page size.
    #[arg(long, allow_negative_numbers = true)]
    pub items_per_page: Option<i64>,
    /// Index of the first item in the full result set.
    #[arg(long, allow_negative_numbers = true)]
    pub start_index: Option<i64>,
    /// Total number of matching items.
    #[arg(long, allow_negative_numbers = true)]
    pub total_items: Option<i64>,
    /// Current page.
    #[arg(long, allow_negative_numbers = true)]
    pub page_index: Option<i64>,
    /// Total number of pages.
    #[arg(long, allow_negative_numbers = true)]
    pub total_pages: Option<i64>,
    /// Link to the current result set.
    #[arg(long)]
    pub self_link: Option<String>,
    /// Link to edit the results.
    #[arg(long)]
    pub edit_link: Option<String>,
    /// Link to the next page.
    #[arg(long)]
    pub next_link: Option<String>,
    /// Link to the previous page.
    #[arg(long)]
    pub previous_link: Option<String>,
    /// Error code.
    #[arg(long)]
    pub error_code: Option<i64>,
    /// Error message.
    #[arg(long)]
    pub error_message: Option<String>,
    /// Error detail message (repeatable).
    #[arg(long = "error-detail", value_name = "MESSAGE")]
    pub error_details: Vec<String>,
    /// Write indented JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StampArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Context for the new envelope.
    #[arg(long)]
    pub context: Option<String>,
    /// Request id for the new envelope.
    #[arg(long)]
    pub id: Option<String>,
    /// Write indented JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Write an envelope to stdout followed by a newline.
pub fn emit_envelope(envelope: &Envelope, pretty: bool) -> CliResult<()> {
    let stdout = std::io::stdout();
    let config = IoConfig {
        pretty,
        ..IoConfig::default()
    };
    let mut writer = EnvelopeWriter::with_config(stdout.lock(), config);
    writer
        .write_envelope(envelope)
        .map_err(|err| stream_error("failed writing envelope", err))?;
    writer
        .get_mut()
        .write_all(b"\n")
        .map_err(|err| io_error("failed writing envelope", err))?;
    writer
        .flush()
        .map_err(|err| stream_error("failed writing envelope", err))
}
