use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::bail;

use super::*;
use crate::jira::types::SubmissionState;
use crate::report::types::{ReportBody, ReportEnvironment};

/// Mock Jira API recording whether the network was touched
struct MockApi {
    outcome: Result<CreatedIssue, String>,
    called: AtomicBool,
}

impl MockApi {
    fn succeeding(key: &str) -> Self {
        Self {
            outcome: Ok(CreatedIssue {
                key: key.to_string(),
                url: format!("https://example.atlassian.net/browse/{}", key),
            }),
            called: AtomicBool::new(false),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            called: AtomicBool::new(false),
        }
    }

    fn was_called(&self) -> bool {
        self.called.load(Ordering::SeqCst)
    }
}

impl JiraApi for MockApi {
    async fn create_issue(&self, _report: &GeneratedReport) -> anyhow::Result<CreatedIssue> {
        self.called.store(true, Ordering::SeqCst);
        match &self.outcome {
            Ok(issue) => Ok(issue.clone()),
            Err(message) => bail!("{}", message),
        }
    }
}

fn full_config() -> JiraConfig {
    JiraConfig {
        base_url: Some("https://example.atlassian.net".to_string()),
        email: Some("qa@example.com".to_string()),
        api_token: Some("token".to_string()),
        project_key: Some("QA".to_string()),
    }
}

fn make_report() -> GeneratedReport {
    GeneratedReport {
        original_id: "bug-1".to_string(),
        generated_at: chrono::Utc::now(),
        body: ReportBody {
            suggested_title: "T".to_string(),
            summary: "S".to_string(),
            steps_to_reproduce: vec!["a".to_string()],
            expected_behavior: "E".to_string(),
            actual_behavior: "A".to_string(),
            impact: "I".to_string(),
            environment: ReportEnvironment {
                browser: "B".to_string(),
                os: "O".to_string(),
                device: "D".to_string(),
            },
            suggested_fix: None,
            severity: None,
        },
    }
}

#[tokio::test]
async fn successful_filing_reaches_success_with_url() {
    let api = MockApi::succeeding("QA-7");
    let mut status = SubmissionStatus::new();

    let issue = submit_report(&api, &full_config(), &mut status, &make_report())
        .await
        .unwrap();
    assert_eq!(issue.key, "QA-7");
    assert_eq!(status.state(), SubmissionState::Success);
    assert_eq!(
        status.issue_url(),
        Some("https://example.atlassian.net/browse/QA-7")
    );
}

#[tokio::test]
async fn remote_failure_reaches_error_with_message() {
    let api = MockApi::failing("project does not exist");
    let mut status = SubmissionStatus::new();

    let err = submit_report(&api, &full_config(), &mut status, &make_report())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::RequestFailed(_)));
    assert_eq!(status.state(), SubmissionState::Error);
    assert!(status.message().unwrap().contains("project does not exist"));
    assert!(api.was_called());
}

#[tokio::test]
async fn missing_config_fails_locally_without_network() {
    let api = MockApi::succeeding("QA-1");
    let mut status = SubmissionStatus::new();
    let mut config = full_config();
    config.api_token = None;

    let err = submit_report(&api, &config, &mut status, &make_report())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::ConfigMissing));
    assert_eq!(status.state(), SubmissionState::Error);
    assert!(status.message().unwrap().contains("not configured"));
    assert!(!api.was_called());
}

#[tokio::test]
async fn error_state_allows_retry() {
    let failing = MockApi::failing("down");
    let mut status = SubmissionStatus::new();
    let report = make_report();

    assert!(submit_report(&failing, &full_config(), &mut status, &report)
        .await
        .is_err());
    assert_eq!(status.state(), SubmissionState::Error);

    let succeeding = MockApi::succeeding("QA-2");
    let issue = submit_report(&succeeding, &full_config(), &mut status, &report)
        .await
        .unwrap();
    assert_eq!(issue.key, "QA-2");
    assert_eq!(status.state(), SubmissionState::Success);
}

#[tokio::test]
async fn filed_report_is_not_refiled() {
    let api = MockApi::succeeding("QA-3");
    let mut status = SubmissionStatus::new();
    let report = make_report();

    submit_report(&api, &full_config(), &mut status, &report)
        .await
        .unwrap();
    api.called.store(false, Ordering::SeqCst);

    let err = submit_report(&api, &full_config(), &mut status, &report)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::AlreadyFiled));
    assert!(!api.was_called());
    // The earlier success is untouched
    assert_eq!(status.state(), SubmissionState::Success);
}
