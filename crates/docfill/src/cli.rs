//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level argument parser.
#[derive(Debug, Parser)]
#[command(
    name = "docfill",
    version,
    about = "Fill and mail-merge placeholder tokens in word-processing documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// How token listings are rendered.
///
/// `Text` is the styled terminal listing; the structured modes serialize the
/// token table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Styled terminal listing
    #[default]
    Text,
    /// Serialize the token table as JSON
    Json,
    /// Serialize the token table as YAML
    Yaml,
    /// Serialize the token table as CSV
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List placeholder tokens detected in a template
    Tokens {
        /// Template document to scan
        template: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        output: OutputMode,
    },

    /// Write a blank CSV data-collection template for a document's tokens
    Blank {
        /// Template document to scan
        template: PathBuf,

        /// Destination CSV path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fill a template with values and write the merged document
    Fill {
        /// Template document to fill
        template: PathBuf,

        /// Values file (.json, .yaml, or the first row of a .csv)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Inline value; repeatable
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Destination document path
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Export even when some fields are empty
        #[arg(long)]
        allow_unfilled: bool,
    },

    /// Fill a template once per CSV row and package the results as one archive
    Merge {
        /// Template document to fill
        template: PathBuf,

        /// CSV rowset; one output document per data row
        #[arg(long)]
        rows: PathBuf,

        /// Destination archive path
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Export even when some fields are empty
        #[arg(long)]
        allow_unfilled: bool,
    },

    /// Print the template text with current values projected in
    Preview {
        /// Template document to preview
        template: PathBuf,

        /// Values file (.json, .yaml, or the first row of a .csv)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Inline value; repeatable
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Turn a span of document text into a new placeholder token
    Tokenize {
        /// Document to rework into a template
        document: PathBuf,

        /// The exact text span to replace
        #[arg(long)]
        text: String,

        /// Key for the new token
        #[arg(long)]
        key: String,

        /// Optional hint stored in the token
        #[arg(long, default_value = "")]
        comment: String,

        /// Replace every occurrence instead of only the first
        #[arg(long)]
        all: bool,

        /// Destination document path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
