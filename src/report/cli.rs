use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for `bugsmith generate`
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Batch file (TOML) describing the bug entries
    #[arg(short, long)]
    pub batch: PathBuf,

    /// Output reports as JSON instead of tables (also the input format
    /// for `render` and `jira submit`)
    #[arg(long)]
    pub json: bool,

    /// Write one export file per report into this directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Export Jira wiki markup instead of plain text
    #[arg(long, requires = "out")]
    pub markup: bool,

    /// File each generated report into Jira
    #[arg(long)]
    pub jira: bool,

    /// Open created Jira issues in the browser
    #[arg(long, requires = "jira")]
    pub open: bool,
}

/// Arguments for `bugsmith render`
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Saved reports file (JSON array, as written by `generate --json`)
    #[arg(short, long)]
    pub reports: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
    pub format: RenderFormat,

    /// Write files into this directory instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Fixed plain-text template
    Text,
    /// Jira wiki markup
    Jira,
}
