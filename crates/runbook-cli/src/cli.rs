//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// runbookgen - one runbook document per alerting rule.
#[derive(Parser, Debug, Clone)]
#[command(name = "runbookgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Summary output format.
    #[arg(long, value_enum, global = true, default_value_t = Format::Table)]
    pub output: Format,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, env = "RUNBOOK_LOG_JSON")]
    pub log_json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Summary output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Runbook document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DocFormat {
    /// Markdown (`.md`).
    #[default]
    Markdown,
    /// Standalone HTML (`.html`).
    Html,
    /// Plain text (`.txt`).
    Text,
    /// Document model as JSON (`.json`).
    Json,
}

impl From<DocFormat> for runbook_core::OutputFormat {
    fn from(format: DocFormat) -> Self {
        match format {
            DocFormat::Markdown => Self::Markdown,
            DocFormat::Html => Self::Html,
            DocFormat::Text => Self::Text,
            DocFormat::Json => Self::Json,
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate one runbook per alert rule.
    Generate(GenerateArgs),

    /// Check a rule file without generating anything.
    Validate(ValidateArgs),

    /// Show the runbooks that would be generated.
    Inspect(InspectArgs),

    /// Remove previously generated runbooks from an output directory.
    Clean(CleanArgs),
}

/// Arguments for the generate command.
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Alerting rule file (YAML or JSON).
    pub file: PathBuf,

    /// Directory the runbooks are written to.
    #[arg(short, long, env = "RUNBOOK_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Runbook document format.
    #[arg(short, long, value_enum, env = "RUNBOOK_FORMAT", default_value_t = DocFormat::Markdown)]
    pub format: DocFormat,

    /// Prefix of every runbook name (defaults to the rule file's stem).
    #[arg(long)]
    pub base_name: Option<String>,

    /// Style file with point sizes (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Overwrite existing runbooks.
    #[arg(long)]
    pub force: bool,

    /// Render runbooks in parallel.
    #[arg(long)]
    pub concurrent: bool,
}

/// Arguments for the validate command.
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Alerting rule file (YAML or JSON).
    pub file: PathBuf,
}

/// Arguments for the inspect command.
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Alerting rule file (YAML or JSON).
    pub file: PathBuf,

    /// Prefix of every runbook name (defaults to the rule file's stem).
    #[arg(long)]
    pub base_name: Option<String>,
}

/// Arguments for the clean command.
#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Prefix the runbooks were generated with.
    #[arg(long, required = true)]
    pub base_name: String,

    /// Directory the runbooks were written to.
    #[arg(short, long, env = "RUNBOOK_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// List what would be removed without removing it.
    #[arg(long)]
    pub dry_run: bool,
}
