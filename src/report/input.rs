//! Batch file loading
//!
//! A batch file is a TOML document describing one whole submission:
//!
//! ```toml
//! [project]
//! name = "Acme Web"
//! build = "1.4.2"
//! logo = "assets/logo.png"
//!
//! [[bug]]
//! title = "Save fails"
//! url = "/profile"
//! steps = "1. Open profile 2. Click Save"
//! expected = "Name updates"
//! actual = "Page reloads, name unchanged"
//! browser = "Chrome 126"
//! severity = "High"
//! screenshot = "shots/save-fail.png"
//! ```
//!
//! Attachment paths are resolved relative to the batch file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::session::Session;
use super::types::Severity;

/// On-disk batch description
#[derive(Debug, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub project: Option<ProjectSection>,
    #[serde(rename = "bug", default)]
    pub bugs: Vec<BugSection>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub build: String,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BugSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub actual: String,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub severity: Option<Severity>,
    pub screenshot: Option<String>,
}

/// Load a batch file and build the session it describes
pub fn load_batch(path: &Path) -> Result<Session> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file: BatchFile =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    build_session(&file, base)
}

/// Build a session from a parsed batch file
pub fn build_session(file: &BatchFile, base: &Path) -> Result<Session> {
    let mut session = Session::empty();

    if let Some(project) = &file.project {
        session.branding.project_name = project.name.clone();
        session.branding.build_number = project.build.clone();
        if let Some(logo) = &project.logo {
            let (name, bytes) = read_attachment(base, logo)?;
            session.set_logo(&name, &bytes)?;
        }
    }

    for bug in &file.bugs {
        let id = session.add_entry();
        let entry = session.entry_mut(&id)?;
        entry.title = bug.title.clone();
        entry.url = bug.url.clone();
        entry.steps = bug.steps.clone();
        entry.expected = bug.expected.clone();
        entry.actual = bug.actual.clone();
        entry.browser = bug.browser.clone();
        entry.os = bug.os.clone();
        entry.device = bug.device.clone();
        entry.severity = bug.severity;

        if let Some(screenshot) = &bug.screenshot {
            let (name, bytes) = read_attachment(base, screenshot)?;
            session.attach_screenshot(&id, &name, &bytes)?;
        }
    }

    Ok(session)
}

fn read_attachment(base: &Path, relative: &str) -> Result<(String, Vec<u8>)> {
    let path = base.join(relative);
    let bytes =
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok((name, bytes))
}
