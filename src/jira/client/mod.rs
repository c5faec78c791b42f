use std::future::Future;

use anyhow::{bail, Context, Result};

use super::config::JiraConfig;
use super::types::CreatedIssue;
use crate::report::types::{GeneratedReport, Severity};

#[cfg(test)]
mod tests;

/// Trait for Jira issue creation (enables mocking in tests)
pub trait JiraApi: Send + Sync {
    /// Create one Bug issue from a generated report
    fn create_issue(
        &self,
        report: &GeneratedReport,
    ) -> impl Future<Output = Result<CreatedIssue>> + Send;
}

/// Jira Cloud REST v3 client (API token auth)
pub struct JiraClient {
    http: reqwest::Client,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("bugsmith/0.3")
            .build()?;
        Ok(Self { http, config })
    }

    fn base(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/')
    }
}

impl JiraApi for JiraClient {
    async fn create_issue(&self, report: &GeneratedReport) -> Result<CreatedIssue> {
        let url = format!("{}/rest/api/3/issue", self.base());
        let project_key = self.config.project_key.as_deref().unwrap_or_default();
        let body = build_issue_payload(project_key, report);

        let response = self
            .http
            .post(&url)
            .basic_auth(
                self.config.email.as_deref().unwrap_or_default(),
                self.config.api_token.as_deref(),
            )
            .json(&body)
            .send()
            .await
            .context("Failed to create issue")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("Failed to create issue: {}", error_text);
        }

        let json: serde_json::Value = response.json().await?;
        let key = json["key"]
            .as_str()
            .context("Issue response missing key")?
            .to_string();
        let url = format!("{}/browse/{}", self.base(), key);
        Ok(CreatedIssue { key, url })
    }
}

/// Build the issue creation body (pure function, testable)
pub fn build_issue_payload(project_key: &str, report: &GeneratedReport) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    fields.insert("project".to_string(), serde_json::json!({ "key": project_key }));
    fields.insert("issuetype".to_string(), serde_json::json!({ "name": "Bug" }));
    fields.insert(
        "summary".to_string(),
        serde_json::json!(report.body.suggested_title),
    );
    if let Some(severity) = report.body.severity {
        fields.insert(
            "priority".to_string(),
            serde_json::json!({ "name": priority_name(severity) }),
        );
    }
    fields.insert("description".to_string(), description_document(report));
    serde_json::json!({ "fields": fields })
}

/// Map severity to a default Jira priority name
fn priority_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "Low",
        Severity::Medium => "Medium",
        Severity::High => "High",
        Severity::Critical => "Highest",
    }
}

/// Jira uses ADF for rich text descriptions
fn description_document(report: &GeneratedReport) -> serde_json::Value {
    let b = &report.body;
    let mut content = vec![
        heading("Summary"),
        paragraph(&b.summary),
        heading("Steps to Reproduce"),
        ordered_list(&b.steps_to_reproduce),
        heading("Expected Behavior"),
        paragraph(&b.expected_behavior),
        heading("Actual Behavior"),
        paragraph(&b.actual_behavior),
        heading("Impact"),
        paragraph(&b.impact),
        heading("Environment"),
        paragraph(&format!(
            "Browser: {} / OS: {} / Device: {}",
            b.environment.browser, b.environment.os, b.environment.device
        )),
    ];
    if let Some(fix) = &b.suggested_fix {
        content.push(heading("Suggested Fix"));
        content.push(paragraph(fix));
    }
    serde_json::json!({ "type": "doc", "version": 1, "content": content })
}

fn heading(text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "heading",
        "attrs": { "level": 2 },
        "content": [{ "type": "text", "text": text }]
    })
}

fn paragraph(text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "paragraph",
        "content": [{ "type": "text", "text": text }]
    })
}

fn ordered_list(items: &[String]) -> serde_json::Value {
    let list_items: Vec<serde_json::Value> = items
        .iter()
        .map(|item| {
            serde_json::json!({
                "type": "listItem",
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": item }]
                }]
            })
        })
        .collect();
    serde_json::json!({ "type": "orderedList", "content": list_items })
}
