//! In-memory session state: the batch being authored and its outcome
//!
//! Holds the editable bug entries, session-level branding, the last published
//! result set, the single error banner, and per-report submission status.
//! Every failing operation rejects before mutating state, and a batch outcome
//! always replaces results, banner, and submission statuses together.

use std::collections::HashMap;

use thiserror::Error;

use super::attachment::{Attachment, AttachmentError, MAX_LOGO_BYTES, MAX_SCREENSHOT_BYTES};
use super::types::{BugInput, GeneratedReport};
use crate::jira::types::SubmissionStatus;


/// Local validation failures; nothing here touches the network
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("no bug entry with id {0}")]
    UnknownEntry(String),

    #[error("bug entry {id}: required field `{field}` is empty")]
    EmptyField { id: String, field: &'static str },

    #[error("a batch needs at least one bug entry")]
    EmptyBatch,
}

/// Session-level branding applied to exports
#[derive(Debug, Clone, Default)]
pub struct Branding {
    pub project_name: String,
    pub build_number: String,
    pub logo: Option<Attachment>,
}

#[derive(Debug, Default)]
pub struct Session {
    entries: Vec<BugInput>,
    next_id: u64,
    pub branding: Branding,
    reports: Vec<GeneratedReport>,
    error_banner: Option<String>,
    submissions: HashMap<String, SubmissionStatus>,
}

impl Session {
    /// New session with one empty entry, matching the initial form state
    #[allow(dead_code)]
    pub fn new() -> Self {
        let mut session = Self::default();
        session.add_entry();
        session
    }

    /// New session with no entries, for programmatic batch construction
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a fresh entry and return its identifier.
    ///
    /// Ids come from a monotonic counter, so they stay unique for the whole
    /// session even after removals.
    pub fn add_entry(&mut self) -> String {
        self.next_id += 1;
        let id = format!("bug-{}", self.next_id);
        self.entries.push(BugInput::new(id.clone()));
        id
    }

    pub fn entries(&self) -> &[BugInput] {
        &self.entries
    }

    pub fn reports(&self) -> &[GeneratedReport] {
        &self.reports
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn entry_mut(&mut self, id: &str) -> Result<&mut BugInput, SessionError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SessionError::UnknownEntry(id.to_string()))
    }

    /// Remove an entry; its screenshot goes with it
    #[allow(dead_code)]
    pub fn remove_entry(&mut self, id: &str) -> Result<(), SessionError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SessionError::UnknownEntry(id.to_string()))?;
        self.entries.remove(pos);
        Ok(())
    }

    /// Attach a screenshot to an entry (4 MiB cap, checked before mutation)
    pub fn attach_screenshot(
        &mut self,
        id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), SessionError> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Err(SessionError::UnknownEntry(id.to_string()));
        }
        let attachment = Attachment::from_bytes(file_name, bytes, MAX_SCREENSHOT_BYTES)?;
        self.entry_mut(id)?.screenshot = Some(attachment);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn clear_screenshot(&mut self, id: &str) -> Result<(), SessionError> {
        self.entry_mut(id)?.screenshot = None;
        Ok(())
    }

    /// Set the session logo (1 MiB cap, checked before mutation)
    pub fn set_logo(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), SessionError> {
        let attachment = Attachment::from_bytes(file_name, bytes, MAX_LOGO_BYTES)?;
        self.branding.logo = Some(attachment);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn clear_logo(&mut self) {
        self.branding.logo = None;
    }

    /// Check every entry has all required fields, as the form does before
    /// allowing a submission
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.entries.is_empty() {
            return Err(SessionError::EmptyBatch);
        }
        for entry in &self.entries {
            for (field, value) in [
                ("title", &entry.title),
                ("url", &entry.url),
                ("steps", &entry.steps),
                ("expected", &entry.expected),
                ("actual", &entry.actual),
            ] {
                if value.trim().is_empty() {
                    return Err(SessionError::EmptyField {
                        id: entry.id.clone(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    /// Publish a successful batch outcome: replaces the result set wholesale
    /// and resets the error banner and every submission status
    pub fn publish_reports(&mut self, reports: Vec<GeneratedReport>) {
        self.submissions = reports
            .iter()
            .map(|r| (r.original_id.clone(), SubmissionStatus::new()))
            .collect();
        self.reports = reports;
        self.error_banner = None;
    }

    /// Record a failed batch: no reports survive, one banner message
    pub fn fail_batch(&mut self, message: String) {
        self.reports.clear();
        self.submissions.clear();
        self.error_banner = Some(message);
    }

    #[allow(dead_code)]
    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    #[allow(dead_code)]
    pub fn submission(&self, id: &str) -> Option<&SubmissionStatus> {
        self.submissions.get(id)
    }

    pub fn submission_mut(&mut self, id: &str) -> Option<&mut SubmissionStatus> {
        self.submissions.get_mut(id)
    }
}
