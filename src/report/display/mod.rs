//! Report rendering: plain text, Jira wiki markup, terminal output
//!
//! Renderers are pure projections of a GeneratedReport; nothing here touches
//! the session state.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

use super::session::Branding;
use super::types::{GeneratedReport, Severity};


/// Output format for terminal results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render one report as the fixed plain-text template
pub fn render_plain_text(report: &GeneratedReport, branding: &Branding) -> String {
    let b = &report.body;
    let mut out = String::new();

    if !branding.project_name.trim().is_empty() {
        out.push_str(&format!("Project: {}", branding.project_name));
        if !branding.build_number.trim().is_empty() {
            out.push_str(&format!(" (build {})", branding.build_number));
        }
        out.push_str("\n\n");
    }

    out.push_str(&format!("Title: {}\n", b.suggested_title));
    if let Some(severity) = b.severity {
        out.push_str(&format!("Severity: {}\n", severity));
    }

    out.push_str(&format!("\nSummary:\n{}\n", b.summary));

    out.push_str("\nSteps to Reproduce:\n");
    for (i, step) in b.steps_to_reproduce.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    out.push_str(&format!("\nExpected Behavior:\n{}\n", b.expected_behavior));
    out.push_str(&format!("\nActual Behavior:\n{}\n", b.actual_behavior));
    out.push_str(&format!("\nImpact:\n{}\n", b.impact));

    out.push_str("\nEnvironment:\n");
    out.push_str(&format!("- Browser: {}\n", b.environment.browser));
    out.push_str(&format!("- OS: {}\n", b.environment.os));
    out.push_str(&format!("- Device: {}\n", b.environment.device));

    if let Some(fix) = &b.suggested_fix {
        out.push_str(&format!("\nSuggested Fix:\n{}\n", fix));
    }

    out
}

/// Parse the numbered step list back out of a plain-text rendering
/// (inverse of the steps section written by [`render_plain_text`])
#[cfg(test)]
pub fn parse_steps(text: &str) -> Vec<String> {
    let mut steps = Vec::new();
    let mut in_steps = false;
    for line in text.lines() {
        if line == "Steps to Reproduce:" {
            in_steps = true;
            continue;
        }
        if !in_steps {
            continue;
        }
        if line.trim().is_empty() {
            break;
        }
        match line.split_once(". ") {
            Some((num, rest)) if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) => {
                steps.push(rest.to_string());
            }
            _ => break,
        }
    }
    steps
}

/// Render one report as Jira wiki markup
pub fn render_jira_markup(report: &GeneratedReport) -> String {
    let b = &report.body;
    let mut out = String::new();

    out.push_str(&format!("h1. {}\n", b.suggested_title));
    if let Some(severity) = b.severity {
        out.push_str(&format!("*Severity:* {}\n", severity));
    }
    out.push_str(&format!("\nh2. Summary\n{}\n", b.summary));

    out.push_str("\nh2. Steps to Reproduce\n");
    for step in &b.steps_to_reproduce {
        out.push_str(&format!("# {}\n", step));
    }

    out.push_str(&format!("\nh2. Expected Behavior\n{}\n", b.expected_behavior));
    out.push_str(&format!("\nh2. Actual Behavior\n{}\n", b.actual_behavior));
    out.push_str(&format!("\nh2. Impact\n{}\n", b.impact));

    out.push_str("\nh2. Environment\n");
    out.push_str(&format!("* Browser: {}\n", b.environment.browser));
    out.push_str(&format!("* OS: {}\n", b.environment.os));
    out.push_str(&format!("* Device: {}\n", b.environment.device));

    if let Some(fix) = &b.suggested_fix {
        out.push_str(&format!("\nh2. Suggested Fix\n{}\n", fix));
    }

    out
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::Red,
        Severity::Critical => Color::Magenta,
    }
}

/// Truncate string
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Output the batch result summary
pub fn output_reports(reports: &[GeneratedReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if reports.is_empty() {
                println!("No reports generated.");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Id", "Title", "Severity", "Browser", "OS"]);

            for report in reports {
                let b = &report.body;
                let severity_cell = match b.severity {
                    Some(s) => Cell::new(s.as_str()).fg(severity_color(s)),
                    None => Cell::new("-"),
                };
                table.add_row(vec![
                    Cell::new(&report.original_id).fg(Color::Cyan),
                    Cell::new(truncate(&b.suggested_title, 50)),
                    severity_cell,
                    Cell::new(truncate(&b.environment.browser, 20)),
                    Cell::new(truncate(&b.environment.os, 20)),
                ]);
            }

            println!("{table}");
            println!("\n{} reports", reports.len());
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(reports).context("Failed to serialize reports")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print the full plain-text rendering of every report
pub fn output_report_details(reports: &[GeneratedReport], branding: &Branding) {
    for report in reports {
        println!("{}", "=".repeat(60));
        println!("{}", report.original_id.bold());
        println!("{}", "=".repeat(60));
        print!("{}", render_plain_text(report, branding));
        println!();
    }
}
