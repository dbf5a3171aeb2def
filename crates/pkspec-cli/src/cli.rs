//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pkspec",
    version,
    about = "Packaging specification tool - generate, check and render packaging specs",
    long_about = "Work with cosmetic packaging specifications (포장사양서).\n\n\
                  Generates marking and label forms from a type selection, runs the\n\
                  wizard pre-flight checks and renders the final document as text or XHTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every option catalog with its codes and labels.
    Catalog,

    /// Generate marking and label forms from a type selection.
    Generate(GenerateArgs),

    /// Turn a saved wizard draft back into a specification.
    Resume(ResumeArgs),

    /// Run the pre-flight checks on a saved specification.
    Check(SpecArgs),

    /// Show marking previews and label items of a saved specification.
    Preview(SpecArgs),

    /// Render the specification document.
    Render(RenderArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Type selection JSON (product config, categories, materials, set components).
    #[arg(value_name = "TYPE_SELECTION")]
    pub type_selection: PathBuf,

    /// Output file (default: 포장사양서_<today>.json in the current directory).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also keep the wizard state as a draft file.
    #[arg(long = "draft", value_name = "FILE")]
    pub draft: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ResumeArgs {
    /// Draft file written by `generate --draft`.
    #[arg(value_name = "DRAFT")]
    pub draft: PathBuf,

    /// Output file (default: 포장사양서_<today>.json in the current directory).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SpecArgs {
    /// Saved specification JSON.
    #[arg(value_name = "SPEC")]
    pub specification: PathBuf,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Saved specification JSON.
    #[arg(value_name = "SPEC")]
    pub specification: PathBuf,

    /// Output file (prints to stdout when omitted).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Document format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: RenderFormatArg,

    /// Document title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Replace embedded images with a count.
    #[arg(long = "no-images")]
    pub no_images: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormatArg {
    Text,
    Html,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
