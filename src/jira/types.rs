use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filing failures, local and remote kept distinct
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(
        "Jira is not configured. Run: bugsmith jira auth --url <base-url> \
         --email <email> --token <api-token> --project <key>"
    )]
    ConfigMissing,

    #[error("Jira request failed: {0}")]
    RequestFailed(String),

    #[error("a submission for this report is already in flight")]
    InFlight,

    #[error("this report was already filed")]
    AlreadyFiled,
}

/// A successfully created Jira issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
    pub url: String,
}

/// Submission lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Per-report submission status, keyed by the report's originating id.
///
/// Legal transitions: `Idle -> Loading -> Success | Error`, and
/// `Error -> Loading` on retry. `Success` is terminal.
#[derive(Debug, Clone)]
pub struct SubmissionStatus {
    state: SubmissionState,
    message: Option<String>,
    issue_url: Option<String>,
}

impl SubmissionStatus {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            message: None,
            issue_url: None,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[allow(dead_code)]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[allow(dead_code)]
    pub fn issue_url(&self) -> Option<&str> {
        self.issue_url.as_deref()
    }

    /// Enter `Loading`; allowed from `Idle`, or from `Error` on retry
    pub fn begin(&mut self) -> Result<(), TrackerError> {
        match self.state {
            SubmissionState::Idle | SubmissionState::Error => {
                self.state = SubmissionState::Loading;
                self.message = None;
                self.issue_url = None;
                Ok(())
            }
            SubmissionState::Loading => Err(TrackerError::InFlight),
            SubmissionState::Success => Err(TrackerError::AlreadyFiled),
        }
    }

    pub fn succeed(&mut self, issue_url: String) {
        self.state = SubmissionState::Success;
        self.issue_url = Some(issue_url);
        self.message = None;
    }

    pub fn fail(&mut self, message: String) {
        self.state = SubmissionState::Error;
        self.message = Some(message);
        self.issue_url = None;
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::new()
    }
}
