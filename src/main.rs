mod cli;
mod gemini;
mod jira;
mod report;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate(args)) => report::run_generate(args).await,
        Some(Command::Render(args)) => report::run_render(args),
        Some(Command::Gemini { cmd }) => match cmd {
            Some(cmd) => gemini::run(cmd),
            None => print_subcommand_help("gemini"),
        },
        Some(Command::Jira { cmd }) => match cmd {
            Some(cmd) => jira::run(cmd).await,
            None => print_subcommand_help("jira"),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn print_subcommand_help(name: &str) -> Result<()> {
    let mut root = Cli::command();
    if let Some(sub) = root.find_subcommand_mut(name) {
        sub.print_help()?;
    }
    Ok(())
}
