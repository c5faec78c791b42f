//! Report filing: the per-report submission state machine plus the single
//! network attempt it gates
//!
//! Each invocation resolves exactly once: `Success` with an issue URL or
//! `Error` with a human-readable message. Missing configuration is a local
//! failure; the status goes straight to `Error` without any network call.

use super::client::JiraApi;
use super::config::JiraConfig;
use super::types::{CreatedIssue, SubmissionStatus, TrackerError};
use crate::report::types::GeneratedReport;

#[cfg(test)]
mod tests;

/// File one report, driving its submission status through the state machine
pub async fn submit_report(
    api: &impl JiraApi,
    config: &JiraConfig,
    status: &mut SubmissionStatus,
    report: &GeneratedReport,
) -> Result<CreatedIssue, TrackerError> {
    if !config.is_configured() {
        let err = TrackerError::ConfigMissing;
        status.fail(err.to_string());
        return Err(err);
    }

    status.begin()?;

    match api.create_issue(report).await {
        Ok(issue) => {
            status.succeed(issue.url.clone());
            Ok(issue)
        }
        Err(e) => {
            let err = TrackerError::RequestFailed(e.to_string());
            status.fail(err.to_string());
            Err(err)
        }
    }
}
