//! Jira issue filing
//!
//! Files generated reports into Jira Cloud (REST v3, API token auth). The
//! per-report state machine lives in [`types`], the single-attempt filing
//! logic in [`submit`].

pub mod client;
pub mod config;
pub mod submit;
pub mod types;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::types::GeneratedReport;
use client::JiraClient;
use types::SubmissionStatus;

/// Jira subcommands
#[derive(Debug, Subcommand)]
pub enum JiraCommand {
    /// Show configuration status
    Config,

    /// Save Jira credentials
    Auth {
        /// Base URL (e.g. https://example.atlassian.net)
        #[arg(long)]
        url: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// API token
        #[arg(long)]
        token: String,

        /// Project key issues are created under (e.g. QA)
        #[arg(long)]
        project: String,
    },

    /// File saved reports as Jira issues
    Submit {
        /// Saved reports file (JSON array, as written by `generate --json`)
        #[arg(short, long)]
        reports: PathBuf,

        /// File only the report with this id
        #[arg(long)]
        id: Option<String>,

        /// Open created issues in the browser
        #[arg(long)]
        open: bool,
    },
}

/// Run a Jira command
#[cfg(not(tarpaulin_include))]
pub async fn run(cmd: JiraCommand) -> Result<()> {
    match cmd {
        JiraCommand::Config => cmd_config(),
        JiraCommand::Auth {
            url,
            email,
            token,
            project,
        } => cmd_auth(&url, &email, &token, &project),
        JiraCommand::Submit { reports, id, open } => {
            cmd_submit(&reports, id.as_deref(), open).await
        }
    }
}

/// Show config status
fn cmd_config() -> Result<()> {
    let config = config::load_config()?;
    println!("Jira Configuration");
    println!("{}", "-".repeat(40));
    println!(
        "Base URL:    {}",
        config.base_url.as_deref().unwrap_or("Not set")
    );
    println!(
        "Email:       {}",
        config.email.as_deref().unwrap_or("Not set")
    );
    println!(
        "API token:   {}",
        if config.api_token.is_some() { "Yes" } else { "No" }
    );
    println!(
        "Project key: {}",
        config.project_key.as_deref().unwrap_or("Not set")
    );
    Ok(())
}

/// Save credentials
fn cmd_auth(url: &str, email: &str, token: &str, project: &str) -> Result<()> {
    config::save_auth(url, email, token, project)?;
    println!("Jira credentials saved for project: {}", project);
    Ok(())
}

/// File saved reports, one attempt each; keeps going past failures
#[cfg(not(tarpaulin_include))]
async fn cmd_submit(path: &Path, only_id: Option<&str>, open_browser: bool) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let reports: Vec<GeneratedReport> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let reports: Vec<GeneratedReport> = match only_id {
        Some(id) => reports.into_iter().filter(|r| r.original_id == id).collect(),
        None => reports,
    };
    if reports.is_empty() {
        bail!("no matching reports in {}", path.display());
    }

    let config = config::load_config()?;
    let client = JiraClient::new(config.clone())?;

    let mut failures = 0;
    for report in &reports {
        let mut status = SubmissionStatus::new();
        match submit::submit_report(&client, &config, &mut status, report).await {
            Ok(issue) => {
                println!(
                    "{} {} -> {}",
                    "filed:".green().bold(),
                    report.original_id,
                    issue.url
                );
                if open_browser {
                    let _ = open::that(&issue.url);
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "failed:".red().bold(), report.original_id, e);
            }
        }
    }
    if failures > 0 {
        bail!("{} of {} submissions failed", failures, reports.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn build_cmd() -> clap::Command {
        #[derive(clap::Parser)]
        struct TestCli {
            #[command(subcommand)]
            cmd: JiraCommand,
        }
        TestCli::command()
    }

    #[test]
    fn parses_config() {
        let cmd = build_cmd();
        assert!(cmd.try_get_matches_from(["test", "config"]).is_ok());
    }

    #[test]
    fn parses_auth_with_all_fields() {
        let cmd = build_cmd();
        let matches = cmd.try_get_matches_from([
            "test", "auth", "--url", "https://x.atlassian.net", "--email", "e@x.com", "--token",
            "t", "--project", "QA",
        ]);
        assert!(matches.is_ok());
    }

    #[test]
    fn auth_requires_every_field() {
        let cmd = build_cmd();
        let matches =
            cmd.try_get_matches_from(["test", "auth", "--url", "https://x.atlassian.net"]);
        assert!(matches.is_err());
    }

    #[test]
    fn parses_submit_with_filter() {
        let cmd = build_cmd();
        let matches = cmd.try_get_matches_from([
            "test", "submit", "--reports", "reports.json", "--id", "bug-2",
        ]);
        assert!(matches.is_ok());
    }

    #[test]
    fn submit_requires_reports() {
        let cmd = build_cmd();
        assert!(cmd.try_get_matches_from(["test", "submit"]).is_err());
    }
}
