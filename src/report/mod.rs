//! Bug report generation and rendering
//!
//! The core flow: load a batch file into a session, validate it, fan out one
//! generation call per entry, publish the outcome wholesale, then render,
//! export, and optionally file the results.

pub mod attachment;
mod batch;
mod cli;
mod display;
mod input;
mod session;
pub mod types;

pub use cli::{GenerateArgs, RenderArgs, RenderFormat};

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::Path;

use crate::gemini::client::GeminiClient;
use crate::gemini::config as gemini_config;
use crate::gemini::error::GenerateError;
use crate::jira;
use display::OutputFormat;
use session::{Branding, Session};
use types::GeneratedReport;

/// Run the generate command
#[cfg(not(tarpaulin_include))]
pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut session = input::load_batch(&args.batch)?;
    session.validate()?;

    let config = gemini_config::load_config().context("Failed to load settings")?;
    let client = GeminiClient::new(&config)?;

    eprintln!("Generating {} report(s)...", session.entries().len());
    match batch::generate_batch(&client, session.entries()).await {
        Ok(reports) => session.publish_reports(reports),
        Err(e) => {
            log_failure_detail(&e);
            session.fail_batch(e.user_message().to_string());
        }
    }

    if let Some(banner) = session.error_banner() {
        eprintln!("{} {}", "error:".red().bold(), banner);
        bail!("batch generation failed");
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    display::output_reports(session.reports(), format)?;
    if !args.json {
        display::output_report_details(session.reports(), &session.branding);
    }

    if let Some(dir) = &args.out {
        export_reports(session.reports(), &session.branding, dir, args.markup)?;
    }

    if args.jira {
        file_to_jira(&mut session, args.open).await?;
    }

    Ok(())
}

/// Run the render command
#[cfg(not(tarpaulin_include))]
pub fn run_render(args: RenderArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.reports)
        .with_context(|| format!("Failed to read {}", args.reports.display()))?;
    let reports: Vec<GeneratedReport> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", args.reports.display()))?;
    if reports.is_empty() {
        bail!("no reports in {}", args.reports.display());
    }

    let branding = Branding::default();
    match &args.out {
        Some(dir) => {
            export_reports(&reports, &branding, dir, args.format == RenderFormat::Jira)
        }
        None => {
            for report in &reports {
                let rendered = match args.format {
                    RenderFormat::Text => display::render_plain_text(report, &branding),
                    RenderFormat::Jira => display::render_jira_markup(report),
                };
                println!("{}", "=".repeat(60));
                print!("{}", rendered);
            }
            Ok(())
        }
    }
}

/// Raw model text goes to stderr for diagnosis, never into the user banner
fn log_failure_detail(err: &GenerateError) {
    match err {
        GenerateError::InvalidResponseFormat { reason, raw } => {
            eprintln!("model response rejected: {}", reason);
            if !raw.is_empty() {
                eprintln!("raw response (truncated): {}", raw);
            }
        }
        other => eprintln!("generation failed: {}", other),
    }
}

/// Write one export file per report; failures here never touch report state
fn export_reports(
    reports: &[GeneratedReport],
    branding: &Branding,
    dir: &Path,
    markup: bool,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for report in reports {
        let (extension, contents) = if markup {
            ("jira.txt", display::render_jira_markup(report))
        } else {
            ("txt", display::render_plain_text(report, branding))
        };
        let path = dir.join(format!("{}.{}", report.original_id, extension));
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// File every published report into Jira, one at a time; a failed filing
/// does not stop the rest and never touches the generated reports
#[cfg(not(tarpaulin_include))]
async fn file_to_jira(session: &mut Session, open_browser: bool) -> Result<()> {
    let config = jira::config::load_config()?;
    let client = jira::client::JiraClient::new(config.clone())?;

    let reports = session.reports().to_vec();
    let mut failures = 0;
    for report in &reports {
        let Some(status) = session.submission_mut(&report.original_id) else {
            continue;
        };
        match jira::submit::submit_report(&client, &config, status, report).await {
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
