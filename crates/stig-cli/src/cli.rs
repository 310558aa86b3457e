//! CLI argument definitions for `stigctl`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "stigctl",
    version,
    about = "Convert DISA STIG checklists into OSCAL component definitions",
    long_about = "Convert DISA STIG Viewer CKLB checklists into OSCAL 1.1.3 component definitions.\n\n\
                  Each checklist rule becomes an implemented requirement whose control is\n\
                  resolved from the rule's CCIs through the DISA CCI list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./stigctl.toml, then ~/.stigctl/config.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
    /// Generate OSCAL documents.
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Check a CKLB checklist for missing required fields.
    Validate(ValidateArgs),

    /// Summarize a CCI list and how it maps to NIST SP 800-53 controls.
    Catalog(CatalogArgs),
}

#[derive(Subcommand)]
pub enum GenerateCommand {
    /// Generate a component definition from a CKLB checklist.
    Component(ComponentArgs),
}

#[derive(Args)]
pub struct ComponentArgs {
    /// CKLB checklist to convert.
    #[arg(short = 'i', long = "input", value_name = "CKLB")]
    pub input: PathBuf,

    /// Component definition to write.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "component.json"
    )]
    pub output: PathBuf,

    /// DISA CCI list XML (default: a small embedded subset of the list).
    ///
    /// The embedded subset covers only a few dozen CCIs, so most rules of a
    /// real checklist resolve to `unknown` without this flag.
    #[arg(long = "cci-file", value_name = "XML")]
    pub cci_file: Option<PathBuf>,

    /// Title for the component definition (default: the checklist title).
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Catalog URI recorded on the control implementation.
    #[arg(long = "source", value_name = "URI")]
    pub source: Option<String>,

    /// Do not embed the checklist as a back-matter resource.
    #[arg(long = "no-back-matter")]
    pub no_back_matter: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(value_name = "CKLB")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// DISA CCI list XML (default: a small embedded subset of the list).
    ///
    /// The embedded subset covers only a few dozen CCIs, so most rules of a
    /// real checklist resolve to `unknown` without this flag.
    #[arg(long = "cci-file", value_name = "XML")]
    pub cci_file: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
