use super::*;
use crate::report::types::{ReportBody, ReportEnvironment};

fn make_report() -> GeneratedReport {
    GeneratedReport {
        original_id: "bug-1".to_string(),
        generated_at: chrono::Utc::now(),
        body: ReportBody {
            suggested_title: "Profile save silently discards changes".to_string(),
            summary: "Saving the profile reloads the page without persisting edits.".to_string(),
            steps_to_reproduce: vec!["Open profile".to_string(), "Click Save".to_string()],
            expected_behavior: "Name updates".to_string(),
            actual_behavior: "Page reloads, name unchanged".to_string(),
            impact: "Users cannot update their profile.".to_string(),
            environment: ReportEnvironment {
                browser: "Chrome 126".to_string(),
                os: "macOS 14".to_string(),
                device: "MacBook Pro".to_string(),
            },
            suggested_fix: None,
            severity: Some(Severity::High),
        },
    }
}

#[test]
fn payload_targets_project_as_bug() {
    let payload = build_issue_payload("QA", &make_report());
    assert_eq!(payload["fields"]["project"]["key"], "QA");
    assert_eq!(payload["fields"]["issuetype"]["name"], "Bug");
    assert_eq!(
        payload["fields"]["summary"],
        "Profile save silently discards changes"
    );
}

#[test]
fn payload_maps_severity_to_priority() {
    let payload = build_issue_payload("QA", &make_report());
    assert_eq!(payload["fields"]["priority"]["name"], "High");
}

#[test]
fn payload_omits_priority_without_severity() {
    let mut report = make_report();
    report.body.severity = None;
    let payload = build_issue_payload("QA", &report);
    assert!(payload["fields"].get("priority").is_none());
}

#[test]
fn priority_names_cover_the_severity_set() {
    assert_eq!(priority_name(Severity::Low), "Low");
    assert_eq!(priority_name(Severity::Medium), "Medium");
    assert_eq!(priority_name(Severity::High), "High");
    assert_eq!(priority_name(Severity::Critical), "Highest");
}

#[test]
fn description_is_an_adf_document() {
    let payload = build_issue_payload("QA", &make_report());
    let description = &payload["fields"]["description"];
    assert_eq!(description["type"], "doc");
    assert_eq!(description["version"], 1);
    assert!(description["content"].as_array().unwrap().len() >= 12);
}

#[test]
fn description_lists_every_step() {
    let payload = build_issue_payload("QA", &make_report());
    let content = payload["fields"]["description"]["content"].as_array().unwrap();
    let list = content
        .iter()
        .find(|node| node["type"] == "orderedList")
        .unwrap();
    assert_eq!(list["content"].as_array().unwrap().len(), 2);
    assert_eq!(
        list["content"][0]["content"][0]["content"][0]["text"],
        "Open profile"
    );
}

#[test]
fn description_includes_fix_section_when_present() {
    let mut report = make_report();
    report.body.suggested_fix = Some("Bind the handler once.".to_string());
    let with_fix = build_issue_payload("QA", &report);
    let text = serde_json::to_string(&with_fix).unwrap();
    assert!(text.contains("Suggested Fix"));
    assert!(text.contains("Bind the handler once."));

    report.body.suggested_fix = None;
    let without_fix = build_issue_payload("QA", &report);
    assert!(!serde_json::to_string(&without_fix).unwrap().contains("Suggested Fix"));
}

#[test]
fn client_strips_trailing_slash_from_base_url() {
    let config = JiraConfig {
        base_url: Some("https://example.atlassian.net/".to_string()),
        email: Some("qa@example.com".to_string()),
        api_token: Some("token".to_string()),
        project_key: Some("QA".to_string()),
    };
    let client = JiraClient::new(config).unwrap();
    assert_eq!(client.base(), "https://example.atlassian.net");
}
