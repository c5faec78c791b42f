use clap::{Parser, Subcommand};

use crate::gemini::GeminiCommand;
use crate::jira::JiraCommand;
use crate::report::{GenerateArgs, RenderArgs};

#[derive(Parser)]
#[command(name = "bugsmith")]
#[command(about = "Structured bug reports from rough descriptions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate reports for a batch of bug descriptions
    Generate(GenerateArgs),

    /// Re-render saved reports (plain text or Jira markup)
    Render(RenderArgs),

    /// Gemini API configuration
    Gemini {
        #[command(subcommand)]
        cmd: Option<GeminiCommand>,
    },

    /// Jira issue filing (auth, submit)
    Jira {
        #[command(subcommand)]
        cmd: Option<JiraCommand>,
    },
}
