//! Prompt construction for report generation
//!
//! One instruction block per bug entry: fixed preamble, the reporter's
//! fields verbatim, an environment section, an image note when a screenshot
//! is attached, and a strict-JSON closing instruction.

use crate::report::types::{BugInput, NOT_SPECIFIED};


/// Build the instruction block for one bug entry
pub fn build_prompt(bug: &BugInput) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Act as an expert QA engineer. Take the rough bug description below and \
         produce a structured, professional bug report.\n\n",
    );

    prompt.push_str("Bug description:\n");
    push_field(&mut prompt, "Title", &bug.title);
    push_field(&mut prompt, "Page URL or location", &bug.url);
    push_field(&mut prompt, "Steps to reproduce", &bug.steps);
    push_field(&mut prompt, "Expected result", &bug.expected);
    push_field(&mut prompt, "Actual result", &bug.actual);
    if let Some(severity) = bug.severity {
        push_field(&mut prompt, "Reported severity", severity.as_str());
    }

    prompt.push('\n');
    prompt.push_str(&environment_section(bug));

    if bug.screenshot.is_some() {
        prompt.push_str(
            "\nA screenshot of the issue is attached. Analyze it for visible UI problems, \
             error messages, and any visual context that clarifies the report.\n",
        );
    }

    prompt.push_str(
        "\nRespond with strict JSON conforming to the provided schema. Do not wrap \
         the JSON in markdown, do not add commentary, and do not escape characters \
         beyond what JSON requires.\n",
    );

    prompt
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if value.trim().is_empty() {
        out.push_str(&format!("- {}: (not provided, infer from context)\n", label));
    } else {
        out.push_str(&format!("- {}: {}\n", label, value));
    }
}

/// List the hints the reporter supplied and ask the model to infer the rest;
/// with no hints at all, ask for full inference
fn environment_section(bug: &BugInput) -> String {
    if !bug.has_environment_hints() {
        return format!(
            "Environment: no details were provided. Infer browser, operating system, \
             and device from the description and the screenshot if one is attached; \
             use \"{}\" where no reasonable inference is possible.\n",
            NOT_SPECIFIED
        );
    }

    let hints = [
        ("Browser", &bug.browser),
        ("Operating system", &bug.os),
        ("Device", &bug.device),
    ];

    let missing: Vec<&str> = hints
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |s| s.trim().is_empty()))
        .map(|(label, _)| *label)
        .collect();

    let mut section = String::from("Environment (as supplied by the reporter):\n");
    for (label, value) in &hints {
        if let Some(value) = value.as_deref().filter(|s| !s.trim().is_empty()) {
            section.push_str(&format!("- {}: {}\n", label, value));
        }
    }
    if missing.is_empty() {
        section.push_str("Keep the supplied values verbatim.\n");
    } else {
        section.push_str(&format!(
            "Keep the supplied values verbatim and infer only: {}. \
             Use \"{}\" where no reasonable inference is possible.\n",
            missing.join(", "),
            NOT_SPECIFIED
        ));
    }
    section
}
